use coverage_window::{CheckedWindow, WindowConfig};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = WindowConfig::new(2, 64);
    let mut window = match CheckedWindow::from_config(config) {
        Ok(window) => window,
        Err(err) => {
            eprintln!("bad config: {err}");
            return;
        }
    };

    // Peers request overlapping batches of heights near the front of the window.
    let mut rng = StdRng::seed_from_u64(17);
    for round in 0..200 {
        let (lo, hi) = window.active_window();
        let start = rng.gen_range(lo - 4..=hi);
        let batch: Vec<u64> = (0..rng.gen_range(1..16)).collect();
        if let Err(violation) = window.apply_items(start, &batch) {
            eprintln!("round {round}: {violation}");
            return;
        }
        if round % 20 == 0 {
            println!(
                "round {round:>3}: window = {:?}, runs = {}",
                window.active_window(),
                window.breakpoint_count()
            );
        }
    }

    println!("Final window: {:?}", window.active_window());
}
