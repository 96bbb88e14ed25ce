use {
    argh::FromArgs,
    futures::executor,
    gateway::{
        event_loop,
        layout::{self, DiskSpec},
        render_state::RenderState,
        scene::{DisorderSource, Scene},
        util::TAU,
    },
    log::{error, info},
    notify::{watcher, DebouncedEvent, RecursiveMode, Watcher},
    std::{path::PathBuf, sync::mpsc::channel, time::Duration},
    winit::{event_loop::EventLoop, platform::unix::WindowBuilderExtUnix, window::WindowBuilder},
};

#[derive(FromArgs)]
/// Disks of noise that settle when someone stands in front of them.
pub struct Arguments {
    /// layout file, one `disk <x> <y> <inner> <outer> <segments> <rings>` per line;
    /// reloaded when it changes
    #[argh(option)]
    layout: Option<PathBuf>,

    /// seconds per revolution of a fully disordered disk
    #[argh(option, default = "10.0")]
    rotation_period: f32,

    /// drive every disk with an oscillation of this period (seconds)
    /// instead of following the cursor
    #[argh(option)]
    oscillate: Option<f64>,

    /// seed for the noise fields, random if omitted
    #[argh(option)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    info!("starting up");

    // Read in command line args
    let args: Arguments = argh::from_env();
    if !(args.rotation_period.is_finite() && args.rotation_period > 0.0) {
        let msg = format!("rotation period must be positive, got {}", args.rotation_period);
        return Err(msg.into());
    }

    let specs: Vec<DiskSpec> = match &args.layout {
        Some(path) => layout::load(path)?,
        None => layout::DEFAULT_LAYOUT.to_vec(),
    };
    info!("loaded {} disks", specs.len());

    let source = match args.oscillate {
        Some(period) if period > 0.0 => DisorderSource::oscillator(period, 0.0),
        Some(period) => {
            return Err(format!("oscillation period must be positive, got {}", period).into())
        }
        None => DisorderSource::Viewer(None),
    };
    let scene = Scene::new(&specs, TAU / args.rotation_period, source, args.seed);

    let event_loop = EventLoop::new();
    let proxy = event_loop.create_proxy();
    let window = WindowBuilder::new()
        .with_title("gateway")
        .with_app_id("gateway".to_string())
        .build(&event_loop)?;

    let render_state = executor::block_on(RenderState::new(&window))?;

    let (tx, rx) = channel();
    let (layout_sender, layout_recv) = channel();

    if let Some(path) = args.layout {
        let input = path.canonicalize()?;
        let dir = input.parent().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
        std::thread::spawn(move || {
            // dropping the watcher stops the events
            let mut watcher = match watcher(tx, Duration::from_millis(100)) {
                Ok(w) => w,
                Err(e) => {
                    error!("cannot watch layout: {}", e);
                    return;
                }
            };
            if let Err(e) = watcher.watch(&dir, RecursiveMode::NonRecursive) {
                error!("cannot watch {}: {}", dir.display(), e);
                return;
            }
            while let Ok(event) = rx.recv() {
                let changed = match event {
                    DebouncedEvent::Create(path) | DebouncedEvent::Write(path) => path,
                    _ => continue,
                };
                if changed.canonicalize().ok().as_ref() != Some(&input) {
                    continue;
                }
                match layout::load(&input) {
                    Ok(specs) => {
                        if layout_sender.send(specs).is_err() || proxy.send_event(()).is_err() {
                            return;
                        }
                    }
                    Err(e) => error!("keeping current layout: {}", e),
                }
            }
        });
    }

    event_loop::start(window, event_loop, layout_recv, scene, render_state)
}
