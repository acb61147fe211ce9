use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

use softstore::catalog::Catalog;
use softstore::download::{DownloadEvent, DownloadRun, DownloadTimer, DownloadTiming, Phase};

fn chrome() -> softstore::catalog::AppRecord {
    Catalog::builtin().find("Google Chrome").cloned().unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_timer_event_sequence_and_timing() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let start = Instant::now();
    let _timer = DownloadTimer::spawn(DownloadTiming::default(), tx);

    let mut last = 0;
    let mut preparing_at = None;
    let mut ready_at = None;
    while let Some(event) = rx.recv().await {
        match event {
            DownloadEvent::Progress(p) => {
                assert!(preparing_at.is_none(), "progress after preparing");
                assert_eq!(p, last + 5);
                last = p;
            }
            DownloadEvent::Preparing => {
                assert_eq!(last, 100);
                preparing_at = Some(start.elapsed());
            }
            DownloadEvent::Ready => ready_at = Some(start.elapsed()),
        }
    }

    let preparing_at = preparing_at.unwrap();
    let ready_at = ready_at.unwrap();
    // 20 ticks to reach 100, one more to leave the scan.
    assert!(preparing_at >= Duration::from_millis(2100), "{preparing_at:?}");
    assert!(preparing_at < Duration::from_millis(2200), "{preparing_at:?}");
    assert!(ready_at - preparing_at >= Duration::from_millis(1500));
    assert!(ready_at - preparing_at < Duration::from_millis(1600));
}

#[tokio::test(start_paused = true)]
async fn test_run_reaches_ready() {
    let mut run = DownloadRun::start(chrome(), DownloadTiming::default());
    assert_eq!(run.phase(), Phase::Scanning { progress: 0 });

    let mut phases = Vec::new();
    while let Some(phase) = run.next().await {
        phases.push(phase);
    }

    assert_eq!(phases.first(), Some(&Phase::Scanning { progress: 5 }));
    assert_eq!(phases[phases.len() - 2], Phase::Preparing);
    assert_eq!(phases.last(), Some(&Phase::Ready));
    assert!(run.simulation().is_ready());
}

#[tokio::test(start_paused = true)]
async fn test_pump_applies_everything_delivered() {
    let mut run = DownloadRun::start(chrome(), DownloadTiming::default());

    tokio::time::sleep(Duration::from_millis(550)).await;
    assert!(!run.pump());
    assert_eq!(run.phase(), Phase::Scanning { progress: 25 });

    tokio::time::sleep(Duration::from_secs(4)).await;
    assert!(run.pump());
    assert_eq!(run.phase(), Phase::Ready);
    assert!(!run.pump());
}

#[tokio::test(start_paused = true)]
async fn test_cancel_stops_events() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let timer = DownloadTimer::spawn(DownloadTiming::default(), tx);

    tokio::time::sleep(Duration::from_millis(350)).await;
    timer.cancel();

    let mut received = Vec::new();
    while let Some(event) = rx.recv().await {
        received.push(event);
    }
    assert_eq!(
        received,
        [
            DownloadEvent::Progress(5),
            DownloadEvent::Progress(10),
            DownloadEvent::Progress(15)
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_drop_stops_timer() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let timer = DownloadTimer::spawn(DownloadTiming::default(), tx);
    drop(timer);

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(rx.recv().await, None);
}

#[tokio::test(start_paused = true)]
async fn test_preparing_phase_is_held_for_delay() {
    let timing = DownloadTiming {
        tick: Duration::from_millis(10),
        step: 50,
        prepare_delay: Duration::from_millis(1500),
    };
    let mut run = DownloadRun::start(chrome(), timing);

    // 50, 100, then Preparing on the third tick.
    tokio::time::sleep(Duration::from_millis(35)).await;
    run.pump();
    assert_eq!(run.phase(), Phase::Preparing);

    tokio::time::sleep(Duration::from_millis(1400)).await;
    assert!(!run.pump());
    assert_eq!(run.phase(), Phase::Preparing);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(run.pump());
}
