use std::time::Duration;

use clap::Parser;
use tokio::io::AsyncBufReadExt;
use tokio::sync::watch;
use tokio::time::{Instant, interval, interval_at};

use snake_engine::{Direction, Session, SessionRng, SessionSettings, log, logger};

/// Headless shell around the engine: paces ticks at the session's
/// current speed, feeds stdin turns into the single pending-direction
/// slot, and logs speed/length whenever either changes.
#[derive(Parser)]
#[command(name = "snake_runner")]
struct Args {
    /// Path to a YAML settings file; defaults are used when omitted
    #[arg(long)]
    config: Option<String>,
    /// RNG seed; drawn at random when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many ticks; runs until quit when omitted
    #[arg(long)]
    ticks: Option<u64>,
    #[arg(long)]
    use_log_prefix: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum InputEvent {
    Turn(Direction),
    Quit,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Runner".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let settings = match &args.config {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read config file: {}", e))?;
            SessionSettings::from_yaml(&content)?
        }
        None => SessionSettings::default(),
    };
    settings.validate()?;

    let seed = args.seed.unwrap_or_else(|| SessionRng::from_random().seed());
    let mut session = Session::new(&settings, seed)?;
    log!(
        "Session started with seed {} on a {}x{} grid",
        seed,
        settings.grid_width,
        settings.grid_height
    );

    let (input_tx, mut input_rx) = watch::channel::<Option<InputEvent>>(None);
    tokio::spawn(read_input(input_tx));

    let mut speed = session.speed();
    let mut length = session.length();
    log_caption(speed, length);

    let mut timer = interval(tick_period(speed));
    let mut tick_count: u64 = 0;
    let mut input_closed = false;

    loop {
        tokio::select! {
            _ = timer.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                log!("Shutdown signal received");
                break;
            }
        }

        // the slot collapses rapid turns to the last one observed
        match drain_input(&mut input_rx, &mut input_closed) {
            Some(InputEvent::Turn(direction)) => session.set_pending_direction(direction),
            Some(InputEvent::Quit) => {
                log!("Quit command received");
                break;
            }
            None => {}
        }

        let report = session.tick()?;
        tick_count += 1;

        if report.reset {
            log!("Snake reset at tick {}", tick_count);
        }
        if report.speed != speed || report.length != length {
            if report.speed != speed {
                timer = rebuild_timer(report.speed);
            }
            speed = report.speed;
            length = report.length;
            log_caption(speed, length);
        }

        if let Some(max_ticks) = args.ticks
            && tick_count >= max_ticks
        {
            break;
        }
    }

    log!(
        "Session ended after {} ticks with length {}",
        tick_count,
        session.length()
    );

    Ok(())
}

fn tick_period(speed: u32) -> Duration {
    let millis = 1000 / u64::from(speed.max(1));
    // tokio intervals reject a zero period
    Duration::from_millis(millis.max(1))
}

/// Timer for a speed change. A plain `interval` fires immediately on
/// creation, which would slip one short tick in after every change, so
/// the rebuilt timer waits a full period before its first tick.
fn rebuild_timer(speed: u32) -> tokio::time::Interval {
    let period = tick_period(speed);
    interval_at(Instant::now() + period, period)
}

/// Reads the pending command, if any. The reader task drops the sender
/// after a quit or at stdin EOF, and the slot can still hold one last
/// unseen command at that point; drain it once before going silent.
fn drain_input(
    input_rx: &mut watch::Receiver<Option<InputEvent>>,
    input_closed: &mut bool,
) -> Option<InputEvent> {
    match input_rx.has_changed() {
        Ok(true) => *input_rx.borrow_and_update(),
        Ok(false) => None,
        Err(_) if !*input_closed => {
            *input_closed = true;
            *input_rx.borrow_and_update()
        }
        Err(_) => None,
    }
}

fn log_caption(speed: u32, length: usize) {
    log!("Speed: {} | Length: {}", speed, length);
}

async fn read_input(tx: watch::Sender<Option<InputEvent>>) {
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let event = match line.trim() {
            "up" | "w" => InputEvent::Turn(Direction::Up),
            "down" | "s" => InputEvent::Turn(Direction::Down),
            "left" | "a" => InputEvent::Turn(Direction::Left),
            "right" | "d" => InputEvent::Turn(Direction::Right),
            "quit" | "q" => InputEvent::Quit,
            _ => continue,
        };
        let quit = event == InputEvent::Quit;
        if tx.send(Some(event)).is_err() || quit {
            break;
        }
    }
}
