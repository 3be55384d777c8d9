use coverage_window::CoverageWindow;

fn main() {
    let mut window = CoverageWindow::new(3, 10);

    for (start, count) in [(1, 5), (1, 6), (1, 7)] {
        window.apply(start, count);
    }
    println!("After nested requests: window = {:?}", window.active_window());

    println!("Runs:");
    for run in window.runs() {
        match run.end {
            Some(end) => println!("  [{}, {}) -> {}", run.start, end, run.count),
            None => println!("  [{}, ..) -> {}", run.start, run.count),
        }
    }

    for _ in 0..3 {
        window.apply(0, 1);
    }
    println!("After saturating 0: window = {:?}", window.active_window());

    window.apply(100, 5);
    println!("Request past window ignored: window = {:?}", window.active_window());
    println!("Breakpoints stored: {}", window.breakpoint_count());
}
