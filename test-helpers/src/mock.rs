//! Canned marketplace data shaped like the backend's responses.

use serde_json::{Value, json};

pub fn jane_doe() -> Value {
    json!({
        "id": 1,
        "fullName": "Jane Doe",
        "email": "jane@example.com",
        "isBlocked": false,
        "createdAt": "2025-01-04T10:00:00Z"
    })
}

pub fn john_smith() -> Value {
    json!({
        "id": 2,
        "fullName": "John Smith",
        "email": "john@example.com",
        "isBlocked": true,
        "createdAt": "2025-02-11T08:30:00Z"
    })
}

pub fn users() -> Vec<Value> {
    vec![jane_doe(), john_smith()]
}

pub fn order(id: i64) -> Value {
    json!({
        "id": id,
        "status": "COMPLETED",
        "totalAmount": 120.5,
        "renter": { "id": 1, "fullName": "Jane Doe" },
        "owner": { "id": 2, "fullName": "John Smith" }
    })
}

pub fn report(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "reason": "Item not as described",
        "status": status,
        "reportedUser": { "id": 2, "fullName": "John Smith" }
    })
}

pub fn verification_request(id: i64) -> Value {
    json!({
        "id": id,
        "fullName": "Jane Doe",
        "badgeStatus": "PENDING",
        "documents": ["passport-front.jpg"]
    })
}
