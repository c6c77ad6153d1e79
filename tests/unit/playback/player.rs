use super::*;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn payloads(n: usize) -> Vec<FrameData> {
    (0..n).map(|i| FrameData::new(format!("frame-{i}"))).collect()
}

#[test]
fn stopped_player_shows_thumbnail() {
    let p = PreviewPlayer::new(payloads(3), FrameData::new("thumb"), PlaybackOpts::default());
    assert_eq!(p.displayed().as_str(), "thumb");
    assert!(!p.is_playing());
}

#[test]
fn playing_cycles_frames_then_toggle_restores_thumbnail() {
    let mut p = PreviewPlayer::new(payloads(3), FrameData::new("thumb"), PlaybackOpts::default());
    assert!(p.toggle(ms(0)));
    assert_eq!(p.displayed().as_str(), "frame-0");

    assert!(p.tick(ms(200)));
    assert_eq!(p.displayed().as_str(), "frame-1");
    assert!(p.tick(ms(400)));
    assert!(p.tick(ms(600)));
    assert_eq!(p.displayed().as_str(), "frame-0");

    assert!(!p.toggle(ms(650)));
    assert_eq!(p.displayed().as_str(), "thumb");
    assert!(!p.tick(ms(800)));
    assert_eq!(p.displayed().as_str(), "thumb");
}

#[test]
fn replace_frames_cancels_pending_timer() {
    let mut p = PreviewPlayer::new(payloads(2), FrameData::new("thumb"), PlaybackOpts::default());
    p.toggle(ms(0));
    let stale = p.pending_timer().unwrap();

    p.replace_frames(payloads(4), FrameData::new("thumb2"));
    assert!(!p.is_playing());
    assert_eq!(p.frame_count(), 4);
    assert!(!p.on_timer(stale, ms(200)));
    assert_eq!(p.displayed().as_str(), "thumb2");
}

#[test]
fn teardown_cancels() {
    let mut p = PreviewPlayer::new(payloads(2), FrameData::new("thumb"), PlaybackOpts::default());
    p.toggle(ms(0));
    p.teardown();
    assert_eq!(p.pending_timer(), None);
    assert!(!p.tick(ms(200)));
}
