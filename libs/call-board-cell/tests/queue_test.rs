use uuid::Uuid;

use call_board_cell::*;

fn professional() -> Professional {
    Professional {
        name: "Helena".to_string(),
        role: "doctor".to_string(),
    }
}

#[test]
fn test_fifo_within_same_priority() {
    let mut queue = PatientQueue::new();
    let conn = Uuid::new_v4();

    for name in ["Ana", "Beto", "Carla"] {
        queue
            .add(name.to_string(), PatientPriority::Normal, professional(), conn)
            .unwrap();
    }

    let names: Vec<&str> = queue.patients().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Ana", "Beto", "Carla"]);
}

#[test]
fn test_all_high_precede_all_normal() {
    let mut queue = PatientQueue::new();
    let conn = Uuid::new_v4();

    let entries = [
        ("Ana", PatientPriority::Normal),
        ("Beto", PatientPriority::High),
        ("Carla", PatientPriority::Normal),
        ("Duda", PatientPriority::High),
    ];
    for (name, priority) in entries {
        queue
            .add(name.to_string(), priority, professional(), conn)
            .unwrap();
    }

    let names: Vec<&str> = queue.patients().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Beto", "Duda", "Ana", "Carla"]);

    // The boundary between tiers is a single cut: no normal before a high
    let first_normal = queue
        .patients()
        .iter()
        .position(|p| p.priority == PatientPriority::Normal)
        .unwrap();
    assert!(queue.patients()[first_normal..]
        .iter()
        .all(|p| p.priority == PatientPriority::Normal));
}

#[test]
fn test_same_millisecond_adds_keep_insertion_order() {
    let mut queue = PatientQueue::new();
    let conn = Uuid::new_v4();

    // A tight loop lands many entries on the same timestamp; the stable
    // sort must preserve insertion order within the tier regardless.
    for i in 0..50 {
        queue
            .add(format!("patient-{}", i), PatientPriority::Normal, professional(), conn)
            .unwrap();
    }

    let names: Vec<String> = queue.patients().iter().map(|p| p.name.clone()).collect();
    let expected: Vec<String> = (0..50).map(|i| format!("patient-{}", i)).collect();
    assert_eq!(names, expected);
}

#[test]
fn test_ids_are_unique_and_generation_ordered() {
    let mut queue = PatientQueue::new();
    let conn = Uuid::new_v4();

    let mut ids = Vec::new();
    for i in 0..20 {
        let patient = queue
            .add(format!("patient-{}", i), PatientPriority::Normal, professional(), conn)
            .unwrap();
        ids.push(patient.id);
    }

    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), ids.len(), "every id must be unique");

    for id in &ids {
        assert!(id.starts_with("patient_"), "unexpected id shape: {}", id);
    }
}

#[test]
fn test_take_removes_exactly_one_entry() {
    let mut queue = PatientQueue::new();
    let conn = Uuid::new_v4();

    let ana = queue
        .add("Ana".to_string(), PatientPriority::Normal, professional(), conn)
        .unwrap();
    queue
        .add("Beto".to_string(), PatientPriority::Normal, professional(), conn)
        .unwrap();

    let taken = queue.take(&ana.id).expect("Ana should be in the queue");
    assert_eq!(taken.name, "Ana");
    assert_eq!(queue.len(), 1);
    assert!(queue.get(&ana.id).is_none());
    assert!(queue.take(&ana.id).is_none(), "second take finds nothing");
}

#[test]
fn test_empty_name_is_rejected() {
    let mut queue = PatientQueue::new();
    let conn = Uuid::new_v4();

    let result = queue.add("".to_string(), PatientPriority::High, professional(), conn);
    assert_eq!(result, Err(CallBoardError::InvalidPatientData));
    assert!(queue.is_empty());
}

#[test]
fn test_entry_snapshots_adder_identity() {
    let mut queue = PatientQueue::new();
    let conn = Uuid::new_v4();

    let patient = queue
        .add("Ana".to_string(), PatientPriority::Normal, professional(), conn)
        .unwrap();
    assert_eq!(patient.added_by, professional());
    assert_eq!(patient.added_by_connection, conn);
}
