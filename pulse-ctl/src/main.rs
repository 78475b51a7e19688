use std::path::{Path, PathBuf};

use anyhow::Context;
use pulse_client::{
    api::{Comment, CommentId, ReactionKind, SortOrder, Uuid},
    prelude::*,
    CommentDump, CommentEngine, EngineConfig, Thread,
};

#[derive(structopt::StructOpt)]
struct Opt {
    /// JSON dump of the comment section, rewritten after each mutation
    #[structopt(short, long, parse(from_os_str))]
    dump: PathBuf,

    /// JSON engine configuration, missing fields take their default value
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    #[structopt(long)]
    max_depth: Option<usize>,

    /// Threads per page, 0 to show everything
    #[structopt(long)]
    page_size: Option<usize>,

    /// newest, oldest, most-liked or most-replies
    #[structopt(long)]
    sort: Option<SortOrder>,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(structopt::StructOpt)]
enum Command {
    /// Print the threads
    Show {
        /// Number of pages to show
        #[structopt(long, default_value = "1")]
        pages: usize,
    },

    /// Print counters about the comment section
    Stats,

    /// Post a comment as the dump's current user
    Add {
        content: String,

        /// Comment to reply to
        #[structopt(long)]
        reply_to: Option<Uuid>,
    },

    Edit {
        id: Uuid,
        content: String,
    },

    Delete {
        id: Uuid,
    },

    /// Add the reaction, or remove it if the current user already reacted so
    React {
        id: Uuid,

        #[structopt(default_value = "like")]
        kind: String,
    },

    Flag {
        id: Uuid,
    },

    /// Pin or unpin a top-level comment
    Pin {
        id: Uuid,
    },

    /// Feature or un-feature a top-level comment
    Feature {
        id: Uuid,
    },

    /// Forget deleted comments nobody replied to
    Purge,
}

fn load_config(opt: &Opt) -> anyhow::Result<EngineConfig> {
    let mut config = match &opt.config {
        None => EngineConfig::default(),
        Some(path) => {
            let file = std::fs::read_to_string(path)
                .with_context(|| format!("reading config file {path:?}"))?;
            serde_json::from_str(&file).with_context(|| format!("parsing config file {path:?}"))?
        }
    };
    if let Some(depth) = opt.max_depth {
        config.max_thread_depth = depth;
    }
    if let Some(size) = opt.page_size {
        config.page_size = Some(size);
    }
    if let Some(order) = opt.sort {
        config.sort_order = order;
    }
    config.validate().context("checking configuration")?;
    Ok(config)
}

fn load_dump(path: &Path) -> anyhow::Result<CommentDump> {
    let file =
        std::fs::read_to_string(path).with_context(|| format!("reading dump file {path:?}"))?;
    serde_json::from_str(&file).with_context(|| format!("parsing dump file {path:?}"))
}

fn save_dump(path: &Path, engine: &CommentEngine) -> anyhow::Result<()> {
    let dump = CommentDump::from_store(engine.current_user().clone(), engine.store());
    let json = serde_json::to_string_pretty(&dump).context("serializing dump")?;
    std::fs::write(path, json).with_context(|| format!("writing dump file {path:?}"))
}

fn reactions_line(c: &Comment) -> Option<String> {
    if c.reactions.is_empty() {
        return None;
    }
    Some(format!(
        "{} likes, {} reactions",
        c.like_count(),
        c.reactions.len()
    ))
}

fn print_thread(t: &Thread) {
    for node in t.iter() {
        let c = &node.comment;
        let mut marks = String::new();
        if c.is_pinned {
            marks.push_str(" [pinned]");
        }
        if c.is_featured {
            marks.push_str(" [featured]");
        }
        if c.is_edited && !c.is_deleted {
            marks.push_str(" (edited)");
        }
        println!(
            "{:indent$}{} {} at {}{marks}",
            "",
            c.id.0,
            c.user.name,
            c.date.format("%Y-%m-%d %H:%M"),
            indent = node.depth * 4,
        );
        for line in c.content.lines() {
            println!("{:indent$}  {line}", "", indent = node.depth * 4);
        }
        if let Some(line) = reactions_line(c) {
            println!("{:indent$}  {line}", "", indent = node.depth * 4);
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let opt = <Opt as structopt::StructOpt>::from_args();
    let config = load_config(&opt)?;
    let mut engine = load_dump(&opt.dump)?.into_engine(config, ());
    tracing::info!(
        num_comments = engine.store().len(),
        sort = %engine.sort_order(),
        "loaded comment section"
    );

    let changed = match opt.cmd {
        Command::Show { pages } => {
            for _ in 1..pages {
                engine.load_more();
            }
            for t in engine.threaded_comments() {
                print_thread(&t);
            }
            if engine.has_more() {
                let shown = engine.threaded_comments().len();
                println!("... {} more threads", engine.total_threads() - shown);
            }
            None
        }
        Command::Stats => {
            let deleted = engine.store().len() - engine.total_comments();
            println!("comments: {}", engine.total_comments());
            println!("deleted: {deleted}");
            println!("threads: {}", engine.total_threads());
            None
        }
        Command::Add { content, reply_to } => {
            Some(engine.add_comment(&content, reply_to.map(CommentId)))
        }
        Command::Edit { id, content } => Some(engine.edit_comment(CommentId(id), &content)),
        Command::Delete { id } => Some(engine.delete_comment(CommentId(id))),
        Command::React { id, kind } => {
            Some(engine.toggle_reaction(CommentId(id), ReactionKind::new(kind)))
        }
        Command::Flag { id } => Some(engine.flag_comment(CommentId(id))),
        Command::Pin { id } => Some(engine.pin_comment(CommentId(id))),
        Command::Feature { id } => Some(engine.feature_comment(CommentId(id))),
        Command::Purge => {
            let num = engine.purge_deleted();
            tracing::info!(num, "purged deleted comments");
            save_dump(&opt.dump, &engine)?;
            None
        }
    };

    if let Some(res) = changed {
        let c = res.context("applying mutation")?;
        tracing::info!(comment_id = ?c.id, "comment updated");
        println!("{}", c.id.0);
        save_dump(&opt.dump, &engine)?;
    }

    Ok(())
}
