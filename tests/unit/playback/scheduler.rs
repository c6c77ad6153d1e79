use super::*;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn cycles_in_order_every_interval() {
    let mut s = PlaybackScheduler::new(3, PlaybackOpts::default());
    s.start(ms(0));
    assert_eq!(s.current_index(), 0);

    let mut seen = vec![s.current_index()];
    let mut now = ms(0);
    for _ in 0..7 {
        let due = s.pending().unwrap().due();
        assert_eq!(due - now, ms(200));
        now = due;
        seen.push(s.tick(now).unwrap());
    }
    assert_eq!(seen, vec![0, 1, 2, 0, 1, 2, 0, 1]);
}

#[test]
fn nothing_fires_before_due() {
    let mut s = PlaybackScheduler::new(2, PlaybackOpts::default());
    s.start(ms(1000));
    assert_eq!(s.tick(ms(1199)), None);
    assert_eq!(s.tick(ms(1200)), Some(1));
}

#[test]
fn toggle_off_cancels_immediately() {
    let mut s = PlaybackScheduler::new(4, PlaybackOpts::default());
    assert!(s.toggle(ms(0)));
    assert_eq!(s.tick(ms(200)), Some(1));
    let stale = s.pending().unwrap();

    assert!(!s.toggle(ms(250)));
    assert_eq!(s.pending(), None);
    assert_eq!(s.tick(ms(10_000)), None);
    assert_eq!(s.on_timer(stale, ms(10_000)), None);
    assert_eq!(s.current_index(), 0);
}

#[test]
fn single_frame_never_schedules() {
    let mut s = PlaybackScheduler::new(1, PlaybackOpts::default());
    s.start(ms(0));
    assert!(s.is_playing());
    assert_eq!(s.pending(), None);
}

#[test]
fn frame_count_change_drops_pending_timer() {
    let mut s = PlaybackScheduler::new(3, PlaybackOpts::default());
    s.start(ms(0));
    let old = s.pending().unwrap();
    s.set_frame_count(5);
    assert!(!s.is_playing());
    assert_eq!(s.on_timer(old, ms(200)), None);
    assert_eq!(s.frame_count(), 5);

    // A restarted cycle does not accept the old handle either.
    s.start(ms(300));
    assert_eq!(s.on_timer(old, ms(500)), None);
    assert_eq!(s.tick(ms(500)), Some(1));
}

#[test]
fn teardown_stops_playback() {
    let mut s = PlaybackScheduler::new(3, PlaybackOpts { interval_ms: 50 });
    s.start(ms(0));
    s.teardown();
    assert!(!s.is_playing());
    assert_eq!(s.tick(ms(50)), None);
}
