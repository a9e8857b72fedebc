use super::*;
use futures::StreamExt;

#[test]
fn closures_are_sinks() {
    let mut seen = Vec::new();
    {
        let mut sink = |f: f64| seen.push(f);
        sink.progress(0.5);
        sink.progress(1.0);
    }
    assert_eq!(seen, vec![0.5, 1.0]);
}

#[test]
fn log_records_in_order() {
    let mut log = ProgressLog::new();
    assert_eq!(log.last(), None);
    log.progress(0.25);
    log.progress(0.75);
    assert_eq!(log.values(), [0.25, 0.75]);
    assert_eq!(log.last(), Some(0.75));
}

#[test]
fn channel_sink_forwards_and_tolerates_closed_receiver() {
    let (mut tx, rx) = futures::channel::mpsc::unbounded::<f64>();
    tx.progress(0.5);
    tx.progress(1.0);
    drop(tx);
    let received: Vec<f64> = pollster::block_on(rx.collect());
    assert_eq!(received, vec![0.5, 1.0]);

    let (mut tx, rx) = futures::channel::mpsc::unbounded::<f64>();
    drop(rx);
    tx.progress(0.5);
}
