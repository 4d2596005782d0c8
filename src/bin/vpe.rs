use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use xxhash_rust::xxh3::xxh3_64;

#[derive(Parser, Debug)]
#[command(name = "vpe", version)]
struct Cli {
    /// Log planning and compilation to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a job and print the buffer sizes and command list it needs.
    Check(CheckArgs),
    /// Compile a job into command and embedded buffer blobs.
    Build(BuildArgs),
    /// Write a run of no-op commands.
    Noops(NoopsArgs),
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Job JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Instance parameters JSON. Defaults to VPE 1.1 with debug options off.
    #[arg(long)]
    init: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct BuildArgs {
    #[command(flatten)]
    job: CheckArgs,

    /// Command buffer output path.
    #[arg(long)]
    cmd_out: PathBuf,

    /// Embedded buffer output path.
    #[arg(long)]
    emb_out: PathBuf,

    /// GPU address the command buffer will live at.
    #[arg(long, value_parser = parse_u64, default_value = "0x100000")]
    cmd_gpu_va: u64,

    /// GPU address the embedded buffer will live at.
    #[arg(long, value_parser = parse_u64, default_value = "0x200000")]
    emb_gpu_va: u64,
}

#[derive(Parser, Debug)]
struct NoopsArgs {
    /// Number of dwords.
    #[arg(long)]
    count: u64,

    /// Output path.
    #[arg(long)]
    out: PathBuf,

    /// Instance parameters JSON.
    #[arg(long)]
    init: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::TRACE)
            .init();
    }
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Build(args) => cmd_build(args),
        Command::Noops(args) => cmd_noops(args),
    }
}

fn parse_u64(s: &str) -> Result<u64, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid address '{s}': {e}"))
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    let r = BufReader::new(f);
    serde_json::from_reader(r).with_context(|| format!("parse {what} JSON '{}'", path.display()))
}

fn open_instance(init: Option<&Path>) -> anyhow::Result<vpe::Vpe> {
    let params = match init {
        Some(path) => read_json(path, "init params")?,
        None => vpe::InitParams::default(),
    };
    Ok(vpe::Vpe::new(params))
}

fn write_file(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let param: vpe::BuildParam = read_json(&args.in_path, "job")?;
    let mut engine = open_instance(args.init.as_deref())?;
    let sizes = engine.check_support(&param).context("check job")?;
    let report = serde_json::json!({
        "required": sizes,
        "commands": engine.commands(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn cmd_build(args: BuildArgs) -> anyhow::Result<()> {
    let param: vpe::BuildParam = read_json(&args.job.in_path, "job")?;
    let mut engine = open_instance(args.job.init.as_deref())?;
    let required = engine.check_support(&param).context("check job")?;

    let mut cmd_mem = vec![0u8; usize::try_from(required.cmd_buf_size)?];
    let mut emb_mem = vec![0u8; usize::try_from(required.emb_buf_size)?];
    let used = {
        let mut bufs = vpe::Buffers {
            cmd: vpe::BufDesc {
                gpu_va: args.cmd_gpu_va,
                cpu: &mut cmd_mem,
                tmz: false,
            },
            emb: vpe::BufDesc {
                gpu_va: args.emb_gpu_va,
                cpu: &mut emb_mem,
                tmz: false,
            },
        };
        engine
            .build_commands(&param, &mut bufs)
            .context("build commands")?
    };
    let cmd_bytes = &cmd_mem[..usize::try_from(used.cmd_buf_size)?];
    let emb_bytes = &emb_mem[..usize::try_from(used.emb_buf_size)?];
    write_file(&args.cmd_out, cmd_bytes)?;
    write_file(&args.emb_out, emb_bytes)?;

    let report = serde_json::json!({
        "required": required,
        "used": used,
        "cmd_xxh3": format!("{:016x}", xxh3_64(cmd_bytes)),
        "emb_xxh3": format!("{:016x}", xxh3_64(emb_bytes)),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn cmd_noops(args: NoopsArgs) -> anyhow::Result<()> {
    let engine = open_instance(args.init.as_deref())?;
    let mut mem = vec![0u8; usize::try_from(args.count.saturating_mul(4))?];
    let mut buf = vpe::BufDesc {
        gpu_va: 0,
        cpu: &mut mem,
        tmz: false,
    };
    engine
        .build_noops(&mut buf, args.count)
        .context("build no-ops")?;
    write_file(&args.out, &mem)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
