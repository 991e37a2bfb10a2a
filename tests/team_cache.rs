use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use salamina_feed::http_cache::{Clock, TeamDataCache};
use salamina_feed::team_data::{Overview, TeamData};
use salamina_feed::team_fetch::TeamDataSource;

const TTL: Duration = Duration::from_secs(300);

#[derive(Clone)]
struct ManualClock {
    base: Instant,
    offset: Arc<Mutex<Duration>>,
}

impl ManualClock {
    fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    fn advance(&self, by: Duration) {
        *self.offset.lock().expect("clock lock") += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + *self.offset.lock().expect("clock lock")
    }
}

/// Source that replays scripted outcomes; `true` succeeds, `false` fails.
/// Once the script runs out every call succeeds.
struct ScriptedSource {
    calls: AtomicUsize,
    script: Mutex<Vec<bool>>,
    delay: Duration,
}

impl ScriptedSource {
    fn new(script: &[bool]) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            script: Mutex::new(script.iter().rev().copied().collect()),
            delay: Duration::ZERO,
        }
    }

    fn slow(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::new(&[])
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TeamDataSource for ScriptedSource {
    fn fetch_team_data(&self) -> anyhow::Result<TeamData> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        let ok = self.script.lock().expect("script lock").pop().unwrap_or(true);
        if ok {
            Ok(TeamData {
                overview: Some(Overview::default()),
                stats: None,
            })
        } else {
            Err(anyhow::anyhow!("scripted failure on call {call}"))
        }
    }
}

#[test]
fn fresh_entry_is_reused_until_ttl() {
    let clock = ManualClock::new();
    let cache = TeamDataCache::with_clock(ScriptedSource::new(&[]), clock.clone(), TTL);
    assert_eq!(cache.ttl(), TTL);

    let first = cache.get_team_data().expect("first fetch");
    assert_eq!(cache.source().calls(), 1);

    clock.advance(TTL - Duration::from_millis(1));
    let second = cache.get_team_data().expect("cached");
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.source().calls(), 1);

    clock.advance(Duration::from_millis(2));
    let third = cache.get_team_data().expect("refetched");
    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(cache.source().calls(), 2);
}

#[test]
fn entry_at_exactly_ttl_is_stale() {
    let clock = ManualClock::new();
    let cache = TeamDataCache::with_clock(ScriptedSource::new(&[]), clock.clone(), TTL);

    cache.get_team_data().expect("first fetch");
    clock.advance(TTL);
    cache.get_team_data().expect("refetched");
    assert_eq!(cache.source().calls(), 2);
}

#[test]
fn failure_is_not_cached() {
    let clock = ManualClock::new();
    let cache = TeamDataCache::with_clock(ScriptedSource::new(&[false, false]), clock, TTL);

    assert!(cache.get_team_data().is_none());
    assert!(cache.peek().is_none());
    assert!(cache.get_team_data().is_none());
    assert_eq!(cache.source().calls(), 2);

    assert!(cache.get_team_data().is_some());
    assert_eq!(cache.source().calls(), 3);
}

#[test]
fn failed_refresh_leaves_stale_entry_untouched() {
    let clock = ManualClock::new();
    let cache = TeamDataCache::with_clock(
        ScriptedSource::new(&[true, false]),
        clock.clone(),
        TTL,
    );

    let first = cache.get_team_data().expect("first fetch");
    clock.advance(TTL + Duration::from_secs(1));

    assert!(cache.get_team_data().is_none());
    let kept = cache.peek().expect("stale entry kept");
    assert!(Arc::ptr_eq(&first, &kept));
    assert_eq!(cache.age(), Some(TTL + Duration::from_secs(1)));

    // Still stale, so the next call goes to the network again.
    cache.get_team_data().expect("recovered");
    assert_eq!(cache.source().calls(), 3);
    assert_eq!(cache.age(), Some(Duration::ZERO));
}

#[test]
fn concurrent_misses_share_one_fetch() {
    let cache = Arc::new(TeamDataCache::new(
        ScriptedSource::slow(Duration::from_millis(50)),
        TTL,
    ));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || cache.get_team_data())
        })
        .collect();
    let results: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("worker panicked"))
        .collect();

    assert!(results.iter().all(Option::is_some));
    assert_eq!(cache.source().calls(), 1);
}
