use phonebook_core::{Contact, ContactId};

#[test]
fn contact_serializes_with_plain_integer_id() {
    let contact = Contact {
        id: ContactId(7),
        full_name: "Ann".to_string(),
        phone_number: "555-0142".to_string(),
    };

    let json = serde_json::to_value(&contact).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "id": 7,
            "full_name": "Ann",
            "phone_number": "555-0142"
        })
    );

    let decoded: Contact = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, contact);
}

#[test]
fn contact_display_is_one_listing_line() {
    let contact = Contact {
        id: ContactId(3),
        full_name: "Bob".to_string(),
        phone_number: "000".to_string(),
    };
    assert_eq!(contact.to_string(), "3: Bob 000");
    assert_eq!(contact.id.get(), 3);
}
