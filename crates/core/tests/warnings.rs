use serde_json::json;
use stac_search::Search;
use std::{
    io::Write,
    sync::{Arc, Mutex},
};

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn capture(f: impl FnOnce()) -> String {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    let bytes = captured.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

#[test]
fn reversed_datetime_range_warns() {
    let output = capture(|| {
        let search = Search::builder("api")
            .datetime("2019/2018")
            .build()
            .unwrap();
        assert_eq!(
            search.datetime().unwrap().to_string(),
            "2018-01-01T00:00:00Z/2019-12-31T23:59:59Z"
        );
    });
    assert!(output.contains("WARN"), "{output}");
    assert!(output.contains("switching values"), "{output}");
}

#[test]
fn ordered_datetime_range_is_quiet() {
    let output = capture(|| {
        let _ = Search::builder("api")
            .datetime("2018/2019")
            .build()
            .unwrap();
    });
    assert!(!output.contains("switching values"), "{output}");
}

#[test]
fn bbox_dropped_for_intersects_warns() {
    let output = capture(|| {
        let search = Search::builder("api")
            .bbox([-180.0, -90.0, 180.0, 90.0])
            .intersects(json!({"type": "Point", "coordinates": [-105.1, 41.1]}))
            .build()
            .unwrap();
        assert!(search.bbox().is_none());
        assert!(search.intersects().is_some());
    });
    assert!(output.contains("WARN"), "{output}");
    assert!(output.contains("dropping bbox"), "{output}");
}
