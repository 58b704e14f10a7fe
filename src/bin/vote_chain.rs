//! Command-line entry point for the vote chain simulation.
//!
//! `vote_chain run` samples votes, records them in a hash-linked ledger and
//! prints the chain oldest first.  `vote_chain digest` prints the digest of
//! a single payload under any supported algorithm.

use std::env;
use std::io::{self, Write};

use vote_chain::{
    report::write_report, run, DigestFormat, HashAlgorithm, Hasher, SimulationConfig,
};

fn fatal(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn print_help() {
    println!("Usage: vote_chain [run] [flags]");
    println!("       vote_chain digest [--hash <algorithm>] [--hex] [--] <payload>");
    println!("Flags for run:");
    println!("  --votes <N>          blocks to record, genesis included (default 10)");
    println!("  --seed <u64>         vote sampler seed (default: current time)");
    println!("  --hash <algorithm>   string | blake2b | sha256 | sha3 (default string)");
    println!("  --format <text|json> report flavour (default text)");
    println!("  --hex                print digests as hex in the text report");
    println!("  --config <file>      JSON settings file; flags override it");
    println!("  --verbose, -v        log each recorded block to stderr");
    println!(
        "Arguments after `--` in digest are taken as the payload, even if they look like flags."
    );
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("help") | Some("--help") | Some("-h") => print_help(),
        Some("digest") => cmd_digest(&args[1..]),
        Some("run") => cmd_run(&args[1..]),
        _ => cmd_run(&args),
    }
}

fn cmd_run(args: &[String]) {
    let mut config = SimulationConfig::from_args(args.iter().cloned())
        .unwrap_or_else(|err| fatal(&format!("invalid arguments: {err}")));
    config.seed = Some(config.resolved_seed());
    if config.verbose {
        eprintln!(
            "starting election: votes={} seed={} hash={}",
            config.votes,
            config.resolved_seed(),
            config.algorithm
        );
    }
    let verbose = config.verbose;
    let digests = config.digests;
    let outcome = run(&config, |position, block| {
        if verbose {
            eprintln!(
                "recorded block #{position} vote={} hash={}",
                block.transaction(),
                digests.apply(block.block_hash())
            );
        }
    })
    .unwrap_or_else(|err| fatal(&format!("failed to record vote: {err}")));

    let summaries = outcome.ledger.render();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(err) = write_report(&mut out, &summaries, config.format, config.digests)
        .and_then(|_| out.flush())
    {
        fatal(&format!("failed to write report: {err}"));
    }
}

#[derive(Debug, PartialEq, Eq)]
struct DigestRequest<'a> {
    payload: &'a str,
    algorithm: HashAlgorithm,
    format: DigestFormat,
}

fn parse_digest_args(args: &[String]) -> Result<DigestRequest<'_>, String> {
    let mut payload: Option<&str> = None;
    let mut algorithm = HashAlgorithm::default();
    let mut format = DigestFormat::Decimal;
    let mut literal = false;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--" if !literal => literal = true,
            "--hash" if !literal => {
                let name = iter.next().ok_or("--hash expects a value")?;
                algorithm = name.parse()?;
            }
            "--hex" if !literal => format = DigestFormat::Hex,
            other if payload.is_none() => payload = Some(other),
            other => return Err(format!("unexpected argument {other}")),
        }
    }
    let payload = payload
        .ok_or("Usage: vote_chain digest [--hash <algorithm>] [--hex] [--] <payload>")?;
    Ok(DigestRequest {
        payload,
        algorithm,
        format,
    })
}

fn cmd_digest(args: &[String]) {
    let request = parse_digest_args(args).unwrap_or_else(|err| fatal(&err));
    println!(
        "{}",
        request
            .format
            .apply(request.algorithm.digest(request.payload.as_bytes()))
    );
}
