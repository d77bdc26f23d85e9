use eventdesk_core::db::{open_db, open_db_in_memory};
use eventdesk_core::{
    Conflict, Event, EventService, RegistrationListQuery, RegistrationService, RepoError,
    SqliteEventRepository, SqliteRegistrationRepository, SqliteStudentRepository, Student,
    StudentService, ValidationError,
};
use rusqlite::Connection;
use std::sync::{Arc, Barrier};
use std::thread;

fn seed_event(conn: &Connection, title: &str) -> Event {
    EventService::new(SqliteEventRepository::try_new(conn).unwrap())
        .create_event(title, "desc", "2024-03-01", None, None)
        .unwrap()
}

fn seed_student(conn: &Connection, name: &str) -> Student {
    StudentService::new(SqliteStudentRepository::try_new(conn).unwrap())
        .create_student(name, format!("{name}@college.edu"), "C-001")
        .unwrap()
}

fn registrations(conn: &Connection) -> RegistrationService<SqliteRegistrationRepository<'_>> {
    RegistrationService::new(SqliteRegistrationRepository::try_new(conn).unwrap())
}

#[test]
fn register_creates_fresh_registration() {
    let conn = open_db_in_memory().unwrap();
    let event = seed_event(&conn, "Hack Day");
    let student = seed_student(&conn, "asha");

    let registration = registrations(&conn)
        .register(event.id, student.id)
        .unwrap();
    assert_eq!(registration.event_id, event.id);
    assert_eq!(registration.student_id, student.id);
    assert!(!registration.attendance);
    assert_eq!(registration.feedback, None);
    assert!(!registration.created_at.is_empty());
}

#[test]
fn registering_same_pair_twice_fails_with_duplicate() {
    let conn = open_db_in_memory().unwrap();
    let event = seed_event(&conn, "Hack Day");
    let student = seed_student(&conn, "asha");
    let service = registrations(&conn);

    service.register(event.id, student.id).unwrap();
    let err = service.register(event.id, student.id).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Duplicate(Conflict::Registration { event_id, student_id })
            if event_id == event.id && student_id == student.id
    ));

    let rows = service
        .list_registrations(&RegistrationListQuery {
            event_id: Some(event.id),
            student_id: Some(student.id),
        })
        .unwrap();
    assert_eq!(rows.len(), 1);
}

#[test]
fn register_rejects_missing_ids_and_unknown_references() {
    let conn = open_db_in_memory().unwrap();
    let event = seed_event(&conn, "Hack Day");
    let service = registrations(&conn);

    let err = service.register(0, 1).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::MissingField("event_id"))
    ));

    let err = service.register(event.id, 404).unwrap_err();
    assert!(matches!(
        err,
        RepoError::MissingReference { student_id: 404, .. }
    ));
    assert!(service
        .list_registrations(&RegistrationListQuery::default())
        .unwrap()
        .is_empty());
}

#[test]
fn attendance_and_feedback_persist_independently_in_either_order() {
    let conn = open_db_in_memory().unwrap();
    let event = seed_event(&conn, "Hack Day");
    let first = seed_student(&conn, "asha");
    let second = seed_student(&conn, "ben");
    let service = registrations(&conn);

    let reg_a = service.register(event.id, first.id).unwrap();
    let reg_b = service.register(event.id, second.id).unwrap();

    service.mark_attendance(reg_a.id, true).unwrap();
    service.record_feedback(reg_a.id, 4).unwrap();

    service.record_feedback(reg_b.id, 2).unwrap();
    service.mark_attendance(reg_b.id, true).unwrap();

    for id in [reg_a.id, reg_b.id] {
        let loaded = service.get_registration(id).unwrap().unwrap();
        assert!(loaded.attendance);
        assert!(loaded.feedback.is_some());
    }
    assert_eq!(
        service
            .get_registration(reg_a.id)
            .unwrap()
            .unwrap()
            .feedback
            .map(|f| f.value()),
        Some(4)
    );
}

#[test]
fn repeated_updates_are_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let event = seed_event(&conn, "Hack Day");
    let student = seed_student(&conn, "asha");
    let service = registrations(&conn);
    let registration = service.register(event.id, student.id).unwrap();

    let once = service.mark_attendance(registration.id, true).unwrap().unwrap();
    let twice = service.mark_attendance(registration.id, true).unwrap().unwrap();
    assert_eq!(once, twice);

    let cleared = service
        .mark_attendance(registration.id, false)
        .unwrap()
        .unwrap();
    assert!(!cleared.attendance);

    let rated = service.record_feedback(registration.id, 5).unwrap().unwrap();
    let rerated = service.record_feedback(registration.id, 5).unwrap().unwrap();
    assert_eq!(rated, rerated);
}

#[test]
fn updates_on_unknown_registration_are_silent_noops() {
    let conn = open_db_in_memory().unwrap();
    let service = registrations(&conn);

    assert_eq!(service.mark_attendance(999, true).unwrap(), None);
    assert_eq!(service.record_feedback(999, 3).unwrap(), None);
}

#[test]
fn out_of_range_feedback_is_rejected_before_writing() {
    let conn = open_db_in_memory().unwrap();
    let event = seed_event(&conn, "Hack Day");
    let student = seed_student(&conn, "asha");
    let service = registrations(&conn);
    let registration = service.register(event.id, student.id).unwrap();

    for bad in [0, 6, -1] {
        let err = service.record_feedback(registration.id, bad).unwrap_err();
        assert!(matches!(
            err,
            RepoError::Validation(ValidationError::FeedbackOutOfRange(value)) if value == bad
        ));
    }

    let loaded = service.get_registration(registration.id).unwrap().unwrap();
    assert_eq!(loaded.feedback, None);
}

#[test]
fn list_registrations_joins_names_filters_and_orders_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let hack = seed_event(&conn, "Hack Day");
    let talk = seed_event(&conn, "Tech Talk");
    let asha = seed_student(&conn, "asha");
    let ben = seed_student(&conn, "ben");
    let service = registrations(&conn);

    let r1 = service.register(hack.id, asha.id).unwrap();
    let r2 = service.register(talk.id, asha.id).unwrap();
    let r3 = service.register(hack.id, ben.id).unwrap();
    conn.execute(
        "UPDATE registrations SET created_at = '2024-01-01 09:00:00';",
        [],
    )
    .unwrap();
    conn.execute(
        "UPDATE registrations SET created_at = '2024-01-02 09:00:00' WHERE id = ?1;",
        [r1.id],
    )
    .unwrap();

    let all: Vec<_> = service
        .list_registrations(&RegistrationListQuery::default())
        .unwrap();
    let ids: Vec<_> = all.iter().map(|view| view.registration.id).collect();
    assert_eq!(ids, vec![r1.id, r3.id, r2.id]);
    assert_eq!(all[0].event_title, "Hack Day");
    assert_eq!(all[0].student_name, "asha");

    let hack_only = service
        .list_registrations(&RegistrationListQuery {
            event_id: Some(hack.id),
            student_id: None,
        })
        .unwrap();
    assert_eq!(hack_only.len(), 2);

    let asha_at_talk = service
        .list_registrations(&RegistrationListQuery {
            event_id: Some(talk.id),
            student_id: Some(asha.id),
        })
        .unwrap();
    assert_eq!(asha_at_talk.len(), 1);
    assert_eq!(asha_at_talk[0].registration.id, r2.id);
}

#[test]
fn corrupt_persisted_attendance_is_reported_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    let event = seed_event(&conn, "Hack Day");
    let student = seed_student(&conn, "asha");
    let service = registrations(&conn);
    let registration = service.register(event.id, student.id).unwrap();

    conn.execute(
        "UPDATE registrations SET attendance = 7 WHERE id = ?1;",
        [registration.id],
    )
    .unwrap();

    let err = service.get_registration(registration.id).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn concurrent_duplicate_registrations_yield_one_success() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("concurrent.db");

    let (event_id, student_id) = {
        let conn = open_db(&path).unwrap();
        (
            seed_event(&conn, "Hack Day").id,
            seed_student(&conn, "asha").id,
        )
    };

    let barrier = Arc::new(Barrier::new(2));
    let handles: Vec<_> = (0..2)
        .map(|_| {
            let path = path.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let conn = open_db(&path).unwrap();
                let service = registrations(&conn);
                barrier.wait();
                service.register(event_id, student_id).map(|r| r.id)
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    assert_eq!(results.iter().filter(|result| result.is_ok()).count(), 1);
    assert!(results
        .iter()
        .any(|result| matches!(result, Err(RepoError::Duplicate(_)))));

    let conn = open_db(&path).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM registrations;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}
