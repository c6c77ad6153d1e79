use super::*;

fn sample() -> Animation {
    let t = DateTime::parse_from_rfc3339("2024-03-01T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc);
    Animation {
        id: "a1".to_string(),
        user_id: "u1".to_string(),
        title: "Bounce".to_string(),
        frames: vec![Frame {
            id: "f1".to_string(),
            data: Some(FrameData::new("data:image/png;base64,AAAA")),
        }],
        thumbnail: FrameData::new("data:image/png;base64,AAAA"),
        created_at: t,
        updated_at: t,
        is_liked: None,
        like_count: 3,
    }
}

#[test]
fn animation_uses_wire_field_names() {
    let v = serde_json::to_value(sample()).unwrap();
    assert_eq!(v["_id"], "a1");
    assert_eq!(v["userId"], "u1");
    assert_eq!(v["likeCount"], 3);
    assert_eq!(v["createdAt"], "2024-03-01T12:00:00Z");
    assert!(v.get("isLiked").is_none());
    assert_eq!(v["frames"][0]["data"], "data:image/png;base64,AAAA");
}

#[test]
fn animation_parses_wire_json() {
    let json = r#"{
        "_id": "a2",
        "userId": "u9",
        "title": "Walk",
        "frames": [{"id": "f1", "data": "x"}, {"id": "f2"}],
        "thumbnail": "x",
        "createdAt": "2024-01-02T03:04:05.000Z",
        "updatedAt": "2024-01-02T03:04:05.000Z",
        "isLiked": true
    }"#;
    let a: Animation = serde_json::from_str(json).unwrap();
    assert_eq!(a.id, "a2");
    assert_eq!(a.is_liked, Some(true));
    assert_eq!(a.like_count, 0);
    assert!(a.frames[1].data.is_none());
}

#[test]
fn update_request_omits_absent_fields() {
    let req = UpdateAnimationRequest {
        title: Some("New".to_string()),
        ..Default::default()
    };
    assert_eq!(
        serde_json::to_string(&req).unwrap(),
        r#"{"title":"New"}"#
    );
}

#[test]
fn react_request_is_camel_case() {
    assert_eq!(
        serde_json::to_string(&ReactRequest { is_liked: true }).unwrap(),
        r#"{"isLiked":true}"#
    );
}
