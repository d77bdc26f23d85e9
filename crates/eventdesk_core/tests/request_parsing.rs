use eventdesk_core::input::{
    event_filter, parse_limit, registration_filter, AttendanceRequest, CreateEventRequest,
    CreateStudentRequest, FeedbackRequest, RegisterRequest,
};
use eventdesk_core::ValidationError;

#[test]
fn create_event_request_keeps_optional_fields_optional() {
    let request = CreateEventRequest::from_json(
        r#"{"title":"Hack Day","description":"Build","date":"2024-03-01"}"#,
    )
    .unwrap();
    assert_eq!(request.kind, None);

    let event = request.into_new_event();
    assert_eq!(event.kind, "General");
    assert_eq!(event.college_id, "C-001");

    let typed = CreateEventRequest::from_json(
        r#"{"title":"Fest","description":"d","date":"2024-04-01","type":"Cultural","college_id":"C-009"}"#,
    )
    .unwrap()
    .into_new_event();
    assert_eq!(typed.kind, "Cultural");
    assert_eq!(typed.college_id, "C-009");
}

#[test]
fn create_event_request_rejects_missing_or_blank_required_fields() {
    assert_eq!(
        CreateEventRequest::from_json(r#"{"description":"d","date":"2024-01-01"}"#),
        Err(ValidationError::MissingField("title"))
    );
    assert_eq!(
        CreateEventRequest::from_json(r#"{"title":"T","description":"  ","date":"2024-01-01"}"#),
        Err(ValidationError::MissingField("description"))
    );
    assert_eq!(
        CreateEventRequest::from_json("not json at all"),
        Err(ValidationError::MissingField("title"))
    );
}

#[test]
fn create_student_request_requires_every_field() {
    let request = CreateStudentRequest::from_json(
        r#"{"name":"Asha","email":"asha@college.edu","college_id":"C-001"}"#,
    )
    .unwrap();
    assert_eq!(request.into_new_student().email, "asha@college.edu");

    assert_eq!(
        CreateStudentRequest::from_json(r#"{"name":"Asha","email":null,"college_id":"C-001"}"#),
        Err(ValidationError::MissingField("email"))
    );
}

#[test]
fn register_request_accepts_numeric_strings_and_rejects_missing_ids() {
    let request = RegisterRequest::from_json(r#"{"event_id":"7","student_id":3}"#).unwrap();
    assert_eq!(request.event_id, 7);
    assert_eq!(request.student_id, 3);

    assert_eq!(
        RegisterRequest::from_json(r#"{"event_id":0,"student_id":3}"#),
        Err(ValidationError::MissingField("event_id"))
    );
    assert_eq!(
        RegisterRequest::from_json(r#"{"event_id":1}"#),
        Err(ValidationError::MissingField("student_id"))
    );
    assert!(matches!(
        RegisterRequest::from_json(r#"{"event_id":"abc","student_id":1}"#),
        Err(ValidationError::NotAnInteger { field: "event_id", .. })
    ));
}

#[test]
fn attendance_request_defaults_present_to_true() {
    let request = AttendanceRequest::from_json(r#"{"registration_id":4}"#).unwrap();
    assert_eq!(request.registration_id, 4);
    assert!(request.present);

    let absent = AttendanceRequest::from_json(r#"{"registration_id":4,"present":false}"#).unwrap();
    assert!(!absent.present);

    let zero = AttendanceRequest::from_json(r#"{"registration_id":4,"present":0}"#).unwrap();
    assert!(!zero.present);

    assert_eq!(
        AttendanceRequest::from_json(r#"{"present":true}"#),
        Err(ValidationError::MissingField("registration_id"))
    );
}

#[test]
fn feedback_request_validates_range_and_type() {
    let request = FeedbackRequest::from_json(r#"{"registration_id":2,"feedback":"4"}"#).unwrap();
    assert_eq!(request.feedback.value(), 4);

    assert_eq!(
        FeedbackRequest::from_json(r#"{"registration_id":2,"feedback":6}"#),
        Err(ValidationError::FeedbackOutOfRange(6))
    );
    assert_eq!(
        FeedbackRequest::from_json(r#"{"registration_id":2}"#),
        Err(ValidationError::MissingField("feedback"))
    );
    assert!(matches!(
        FeedbackRequest::from_json(r#"{"registration_id":2,"feedback":4.5}"#),
        Err(ValidationError::NotAnInteger { field: "feedback", .. })
    ));
    assert!(matches!(
        FeedbackRequest::from_json(r#"{"registration_id":2,"feedback":true}"#),
        Err(ValidationError::NotAnInteger { .. })
    ));
}

#[test]
fn query_filters_treat_blank_values_as_absent() {
    let filter = event_filter(Some(" "), Some("C-002"));
    assert_eq!(filter.kind, None);
    assert_eq!(filter.college_id.as_deref(), Some("C-002"));

    let filter = registration_filter(Some("5"), Some("")).unwrap();
    assert_eq!(filter.event_id, Some(5));
    assert_eq!(filter.student_id, None);

    assert!(registration_filter(Some("five"), None).is_err());
}

#[test]
fn limit_parsing_defaults_to_three() {
    assert_eq!(parse_limit(None), Ok(3));
    assert_eq!(parse_limit(Some("")), Ok(3));
    assert_eq!(parse_limit(Some("10")), Ok(10));
    assert_eq!(
        parse_limit(Some("-1")),
        Err(ValidationError::InvalidLimit("-1".to_string()))
    );
}
