use super::*;
use crate::frames::store::{Frame, FrameData};

fn scratch(name: &str) -> PathBuf {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("target")
        .join("flipbook_unit")
        .join(format!("{name}-{}", uuid::Uuid::new_v4().simple()));
    dir.join("store.json")
}

fn cred() -> Credential {
    Credential {
        token: "t".to_string(),
        uid: "u1".to_string(),
        expires_at: Utc::now() + chrono::Duration::hours(1),
    }
}

fn request(title: &str) -> CreateAnimationRequest {
    CreateAnimationRequest {
        title: title.to_string(),
        frames: vec![Frame {
            id: "f1".to_string(),
            data: Some(FrameData::new("payload")),
        }],
    }
}

#[test]
fn missing_file_opens_empty() {
    let s = FileStore::open(scratch("missing")).unwrap();
    assert!(s.is_empty());
    assert!(!s.path().exists());
}

#[test]
fn writes_survive_reopen() {
    let path = scratch("reopen");
    let id = {
        let mut s = FileStore::open(&path).unwrap();
        let a = s.create_animation(&cred(), request("Saved")).unwrap().animation;
        s.react(&cred(), &a.id, true).unwrap();
        a.id
    };
    assert!(path.exists());

    let mut s = FileStore::open(&path).unwrap();
    assert_eq!(s.get(&id).unwrap().title, "Saved");
    let list = s.list_animations(&cred()).unwrap();
    assert_eq!(list.animations[0].like_count, 1);
    assert_eq!(list.animations[0].is_liked, Some(true));

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"_id\""));
    assert!(raw.contains("\"userId\""));
}

#[test]
fn rejected_mutation_does_not_touch_file() {
    let path = scratch("rejected");
    let mut s = FileStore::open(&path).unwrap();
    let mut bad = request("x");
    bad.frames[0].data = None;
    assert!(s.create_animation(&cred(), bad).is_err());
    assert!(!path.exists());
    assert!(s.is_empty());
}

#[test]
fn corrupt_file_is_a_serde_error() {
    let path = scratch("corrupt");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, b"{not json").unwrap();
    assert!(matches!(
        FileStore::open(&path).unwrap_err(),
        FlipbookError::Serde(_)
    ));
}

#[test]
fn failed_write_keeps_previous_store_file() {
    let path = scratch("atomic");
    let mut s = FileStore::open(&path).unwrap();
    s.create_animation(&cred(), request("Kept")).unwrap();
    let before = std::fs::read(&path).unwrap();
    assert!(!s.tmp_path().exists());

    // A directory in the way of the scratch file makes the next write fail.
    std::fs::create_dir_all(s.tmp_path()).unwrap();
    assert!(matches!(
        s.create_animation(&cred(), request("Lost")).unwrap_err(),
        FlipbookError::Remote(_)
    ));
    assert_eq!(std::fs::read(&path).unwrap(), before);
    assert_eq!(s.len(), 1);
    assert_eq!(FileStore::open(&path).unwrap().len(), 1);
}
