use treatment_cell::models::{BookedSlot, Treatment};
use treatment_cell::services::availability::remove_booked;

fn cleaning() -> Treatment {
    Treatment {
        name: "Teeth Cleaning".to_string(),
        price: 80.0,
        slots: vec![
            "08:00 AM".to_string(),
            "09:00 AM".to_string(),
            "10:00 AM".to_string(),
            "11:00 AM".to_string(),
        ],
    }
}

fn whitening() -> Treatment {
    Treatment {
        name: "Teeth Whitening".to_string(),
        price: 120.0,
        slots: vec!["01:00 PM".to_string(), "02:00 PM".to_string()],
    }
}

fn booked(treatment: &str, slot: &str) -> BookedSlot {
    BookedSlot {
        treatment: treatment.to_string(),
        slot: slot.to_string(),
    }
}

#[test]
fn no_bookings_leaves_every_schedule_unchanged() {
    let treatments = vec![cleaning(), whitening()];
    let result = remove_booked(treatments.clone(), &[]);
    assert_eq!(result, treatments);
}

#[test]
fn booked_slot_is_removed_others_keep_order() {
    let result = remove_booked(vec![cleaning()], &[booked("Teeth Cleaning", "09:00 AM")]);

    assert_eq!(
        result[0].slots,
        vec!["08:00 AM", "10:00 AM", "11:00 AM"],
        "remaining slots must keep the original order"
    );
}

#[test]
fn bookings_only_affect_their_own_treatment() {
    let result = remove_booked(
        vec![cleaning(), whitening()],
        &[booked("Teeth Cleaning", "09:00 AM")],
    );

    assert_eq!(result[0].slots.len(), 3);
    assert_eq!(result[1], whitening());
}

#[test]
fn fully_booked_treatment_has_no_slots() {
    let result = remove_booked(
        vec![whitening()],
        &[
            booked("Teeth Whitening", "01:00 PM"),
            booked("Teeth Whitening", "02:00 PM"),
        ],
    );
    assert!(result[0].slots.is_empty());
}

#[test]
fn treatment_with_no_slots_stays_empty() {
    let bare = Treatment {
        name: "Consultation".to_string(),
        price: 0.0,
        slots: vec![],
    };
    let result = remove_booked(vec![bare], &[booked("Consultation", "09:00 AM")]);
    assert!(result[0].slots.is_empty());
}

#[test]
fn booking_for_unknown_treatment_is_ignored() {
    let result = remove_booked(vec![cleaning()], &[booked("Root Canal", "09:00 AM")]);
    assert_eq!(result, vec![cleaning()]);
}

#[test]
fn filter_is_idempotent() {
    let bookings = [booked("Teeth Cleaning", "10:00 AM")];
    let once = remove_booked(vec![cleaning(), whitening()], &bookings);
    let twice = remove_booked(once.clone(), &bookings);
    assert_eq!(once, twice);
}
