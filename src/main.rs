pub mod batch;
pub mod error;
pub mod fetcher;
pub mod fstools;
pub mod logging;
pub mod metadata;
pub mod queue_processor;
pub mod resolver;
pub mod transcript;
pub mod transcript_state;
pub mod transcript_task;
pub mod ytdlp;

#[cfg(test)]
mod testing;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use rustop::opts;
use signal_hook::consts::SIGINT;
use tracing::warn;

use batch::{incomplete_line, summary_line, BatchFetcher};
use fetcher::{FetchOptions, TranscriptFetcher};
use fstools::{default_output_dir, ensure_output_dir};
use resolver::resolve_playlist;
use transcript::formatter::TextFormatter;
use transcript::youtube::YouTubeTranscripts;
use transcript_task::LanguageSelection;
use ytdlp::YtDlp;

const INTERRUPTED: u8 = 130;

fn main() -> ExitCode {
    let (args, _rest) = opts! {
        synopsis "Download the transcript of every video in a YouTube playlist.";
        opt languages:String=String::from("all"), desc:"Comma separated list of language codes (e.g. 'en,de'). Downloads all available by default.";
        opt output_dir:Option<String>, long:"output_dir", desc:"Output folder for transcripts. Named after the playlist by default.";
        opt multi:usize=batch::DEFAULT_WORKERS, desc:"Amount of simultaneous downloads.";
        opt delay:f64=1.2, desc:"Seconds to pause after each saved transcript.";
        opt timestamps:bool=false, desc:"Prefix every transcript line with its start time.";
        opt ytdlp:String=String::from("yt-dlp"), desc:"Path of the yt-dlp executable.";
        opt verbose:bool=false, desc:"Log diagnostics to stderr.";
        param playlist_url:String, desc:"The URL of the YouTube playlist";
    }.parse_or_exit();

    logging::init_logging(args.verbose);

    let ytdlp = YtDlp::new(&args.ytdlp);
    if !ytdlp.is_installed() {
        println!("yt-dlp is not installed.");
        return ExitCode::FAILURE;
    }

    let transcripts = match YouTubeTranscripts::new(ytdlp.clone()) {
        Ok(transcripts) => Arc::new(transcripts),
        Err(err) => {
            println!("Unable to create HTTP client: {}", err);
            return ExitCode::FAILURE;
        },
    };
    let metadata = Arc::new(ytdlp);

    let playlist = match resolve_playlist(metadata.as_ref(), &args.playlist_url) {
        Ok(playlist) => playlist,
        Err(err) => {
            println!("{}", err);
            return ExitCode::FAILURE;
        },
    };

    let output_dir = match &args.output_dir {
        Some(dir) => PathBuf::from(dir),
        None => default_output_dir(&playlist.title),
    };
    if let Err(err) = ensure_output_dir(&output_dir) {
        println!("{}", err);
        return ExitCode::FAILURE;
    }

    let interrupt = Arc::new(AtomicBool::new(false));
    if let Err(err) = signal_hook::flag::register(SIGINT, Arc::clone(&interrupt)) {
        warn!(error = %err, "unable to install interrupt handler");
    }

    let options = FetchOptions::new(output_dir)
        .delay(Duration::try_from_secs_f64(args.delay.max(0.0)).unwrap_or(fetcher::DEFAULT_DELAY))
        .formatter(TextFormatter::default().timestamps(args.timestamps));
    let fetcher = TranscriptFetcher::new(metadata, transcripts, options);
    let languages = LanguageSelection::parse(&args.languages);

    println!("{}: {} videos, languages: {}", playlist.title, playlist.video_ids.len(), languages);
    let outcome = BatchFetcher::new(Arc::new(fetcher), interrupt)
        .workers(args.multi)
        .run(playlist.tasks(&languages));

    if outcome.interrupted {
        println!("\nProcess interrupted by user. Exiting...");
        ExitCode::from(INTERRUPTED)
    } else if !outcome.is_complete() {
        println!("{}", incomplete_line(&outcome));
        ExitCode::FAILURE
    } else {
        println!("{}", summary_line(&outcome));
        ExitCode::SUCCESS
    }
}
