use super::*;

#[test]
fn sequential_ids_count_up_from_one() {
    let mut ids = SequentialIdGenerator::new("msg");
    assert_eq!(ids.next_id(), "msg-1");
    assert_eq!(ids.next_id(), "msg-2");
    assert_eq!(SequentialIdGenerator::default().next_id(), "id-1");
}

#[test]
fn uuid_ids_are_unique_v4() {
    let mut ids = UuidIdGenerator;
    let a = ids.next_id();
    let b = ids.next_id();
    assert_ne!(a, b);
    let parsed = uuid::Uuid::parse_str(&a).unwrap();
    assert_eq!(parsed.get_version_num(), 4);
}
