use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flipbook::{
    AnimationStore, CreateAnimationRequest, Credential, Editor, EditorOpts, FileStore,
    IdentitySession, PlaybackOpts, PointerEvent, PreviewPlayer, Rgba8, Surface, Tool, User,
    Viewport,
};

#[derive(Parser, Debug)]
#[command(name = "flipbook", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay an editing script and write the frames as PNG.
    Draw(DrawArgs),
    /// Replay an editing script and save the animation into a store file.
    Publish(PublishArgs),
    /// List animations in a store file.
    List(ListArgs),
    /// Preview a stored animation in real time.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct DrawArgs {
    /// Editing script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Output directory for `frame_NNN.png` and `animation.json`.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct PublishArgs {
    /// Editing script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Store file; created when missing.
    #[arg(long)]
    store: PathBuf,

    /// Uid to publish as.
    #[arg(long)]
    user: String,

    /// Override the script's title.
    #[arg(long)]
    title: Option<String>,

    /// Edit this stored animation instead of creating a new one.
    #[arg(long)]
    id: Option<String>,
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// Store file.
    #[arg(long)]
    store: PathBuf,

    /// Uid to list as.
    #[arg(long)]
    user: String,

    /// List the most-liked animations of all users instead of your own.
    #[arg(long, default_value_t = false)]
    top_liked: bool,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Store file.
    #[arg(long)]
    store: PathBuf,

    /// Animation id.
    #[arg(long)]
    id: String,

    /// Number of full passes over the frames.
    #[arg(long, default_value_t = 1)]
    cycles: u32,

    /// Frame interval in milliseconds.
    #[arg(long, default_value_t = PlaybackOpts::default().interval_ms)]
    interval_ms: u64,
}

/// A scripted editing session.
#[derive(serde::Deserialize, Debug, Default)]
#[serde(default)]
struct Script {
    title: Option<String>,
    editor: EditorOpts,
    actions: Vec<Action>,
}

#[derive(serde::Deserialize, Debug)]
#[serde(tag = "action", rename_all = "snake_case")]
enum Action {
    Tool { tool: Tool },
    Color { color: Rgba8 },
    Width { width: f64 },
    Viewport(Viewport),
    Title { title: String },
    OnionSkin { enabled: bool },
    /// Single event; `client` selects device coordinates mapped through the viewport.
    Pointer {
        event: PointerEvent,
        #[serde(default)]
        client: bool,
    },
    /// Press at the first point, move through the rest, release at the last.
    Stroke { points: Vec<[f64; 2]> },
    AddFrame,
    DeleteFrame,
    SwitchFrame { index: usize },
    ClearFrame,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flipbook=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Draw(args) => cmd_draw(args),
        Command::Publish(args) => cmd_publish(args),
        Command::List(args) => cmd_list(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn load_script(path: &Path) -> anyhow::Result<Script> {
    let f = std::fs::File::open(path)
        .with_context(|| format!("open script '{}'", path.display()))?;
    serde_json::from_reader(std::io::BufReader::new(f))
        .with_context(|| format!("parse script '{}'", path.display()))
}

fn replay(editor: &mut Editor, actions: &[Action]) -> anyhow::Result<()> {
    for (i, action) in actions.iter().enumerate() {
        apply(editor, action).with_context(|| format!("script action #{i} ({action:?})"))?;
        editor.run_pending_loads()?;
    }
    Ok(())
}

fn apply(editor: &mut Editor, action: &Action) -> flipbook::FlipbookResult<()> {
    match action {
        Action::Tool { tool } => editor.set_tool(*tool),
        Action::Color { color } => editor.set_color(*color),
        Action::Width { width } => editor.set_width(*width),
        Action::Viewport(vp) => editor.set_viewport(*vp),
        Action::Title { title } => editor.set_title(title.clone()),
        Action::OnionSkin { enabled } => editor.set_onion_skin(*enabled),
        Action::Pointer { event, client } => {
            if *client {
                editor.pointer(*event)?;
            } else {
                editor.pointer_logical(*event)?;
            }
        }
        Action::Stroke { points } => {
            let (Some(first), Some(last)) = (points.first(), points.last()) else {
                return Ok(());
            };
            editor.pointer_logical(PointerEvent::Down {
                x: first[0],
                y: first[1],
            })?;
            for p in &points[1..] {
                editor.pointer_logical(PointerEvent::Move { x: p[0], y: p[1] })?;
            }
            editor.pointer_logical(PointerEvent::Up {
                x: last[0],
                y: last[1],
            })?;
        }
        Action::AddFrame => {
            editor.add_new_frame()?;
        }
        Action::DeleteFrame => {
            editor.delete_current_frame()?;
        }
        Action::SwitchFrame { index } => {
            editor.switch_frame(*index)?;
        }
        Action::ClearFrame => editor.clear_current_frame()?,
    }
    Ok(())
}

fn cmd_draw(args: DrawArgs) -> anyhow::Result<()> {
    let script = load_script(&args.script)?;
    let mut editor = Editor::new(script.editor)?;
    if let Some(title) = &script.title {
        editor.set_title(title.clone());
    }
    replay(&mut editor, &script.actions)?;
    let submission = editor.prepare_submission()?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let canvas = editor.opts().canvas;
    for (i, frame) in submission.frames.iter().enumerate() {
        let Some(data) = &frame.data else { continue };
        let img = flipbook::decode_frame_data(data)?;
        let surface = Surface::from_premul_rgba8(canvas, &img.rgba8_premul, img.width, img.height)?;
        let out = args.out_dir.join(format!("frame_{i:03}.png"));
        image::save_buffer_with_format(
            &out,
            &surface.to_straight_rgba8(),
            canvas.width,
            canvas.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", out.display()))?;
    }

    let body = CreateAnimationRequest {
        title: submission.title,
        frames: submission.frames,
    };
    let json_path = args.out_dir.join("animation.json");
    std::fs::write(&json_path, serde_json::to_vec_pretty(&body)?)
        .with_context(|| format!("write '{}'", json_path.display()))?;

    eprintln!(
        "wrote {} frame(s) to {}",
        body.frames.len(),
        args.out_dir.display()
    );
    Ok(())
}

fn local_session(uid: &str) -> IdentitySession {
    IdentitySession::signed_in(
        User {
            uid: uid.to_string(),
            display_name: uid.to_string(),
            email: None,
            photo_url: None,
        },
        Credential {
            token: uuid::Uuid::new_v4().simple().to_string(),
            uid: uid.to_string(),
            expires_at: chrono::Utc::now() + chrono::Duration::hours(1),
        },
    )
}

fn cmd_publish(args: PublishArgs) -> anyhow::Result<()> {
    let script = load_script(&args.script)?;
    let mut store = FileStore::open(&args.store)?;

    let mut editor = match &args.id {
        Some(id) => {
            let animation = store
                .get(id)
                .with_context(|| format!("no animation '{id}' in '{}'", args.store.display()))?;
            Editor::open(animation, script.editor)?
        }
        None => Editor::new(script.editor)?,
    };
    editor.run_pending_loads()?;
    if let Some(title) = args.title.as_ref().or(script.title.as_ref()) {
        editor.set_title(title.clone());
    }
    replay(&mut editor, &script.actions)?;

    let session = local_session(&args.user);
    let animation = flipbook::publish(&mut editor, &mut store, &session, chrono::Utc::now())?;
    println!("{}", animation.id);
    eprintln!(
        "saved '{}' ({} frame(s)) to {}",
        animation.title,
        animation.frames.len(),
        args.store.display()
    );
    Ok(())
}

fn cmd_list(args: ListArgs) -> anyhow::Result<()> {
    let mut store = FileStore::open(&args.store)?;
    let session = local_session(&args.user);
    let auth = session.bearer(chrono::Utc::now())?;
    let res = if args.top_liked {
        store.list_top_liked(auth)?
    } else {
        store.list_animations(auth)?
    };
    for a in &res.animations {
        println!(
            "{}\t{}\t{} like(s)\t{} frame(s)\t{}",
            a.id,
            a.title,
            a.like_count,
            a.frames.len(),
            a.created_at.to_rfc3339()
        );
    }
    eprintln!("{} animation(s)", res.count);
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let store = FileStore::open(&args.store)?;
    let animation = store
        .get(&args.id)
        .with_context(|| format!("no animation '{}' in '{}'", args.id, args.store.display()))?;
    let opts = PlaybackOpts {
        interval_ms: args.interval_ms,
    };
    let mut player = PreviewPlayer::from_animation(animation, opts);

    let origin = Instant::now();
    player.toggle(origin.elapsed());
    println!("{}", player.current_index());

    let ticks = (player.frame_count() as u64).saturating_mul(u64::from(args.cycles));
    let mut shown = 1;
    while shown < ticks {
        let Some(due) = player.pending_timer().map(|h| h.due()) else {
            break;
        };
        std::thread::sleep(due.saturating_sub(origin.elapsed()));
        player.tick(origin.elapsed().max(due));
        println!("{}", player.current_index());
        shown += 1;
    }
    player.teardown();
    Ok(())
}
