use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use codecfilter::negotiation::DEFAULT_VIDEO_TRANSFORM;
use codecfilter::{CodecPreferences, EmptyCodecPolicy, OfferRequest, SessionDescription};

#[derive(Parser)]
#[command(
    name = "sdp-filter",
    about = "Restrict an SDP offer to one codec per media kind"
)]
struct Args {
    /// SDP offer to filter (reads stdin when omitted or `-`)
    input: Option<PathBuf>,

    /// Audio codec to keep, as named in a=rtpmap (`default` keeps all)
    #[arg(long, short, default_value = "default")]
    audio_codec: String,

    /// Video codec to keep, as named in a=rtpmap (`default` keeps all)
    #[arg(long, short, default_value = "default")]
    video_codec: String,

    /// What to do when a requested codec is not in the offer
    #[arg(long, value_enum, default_value_t = OnEmpty::Keep)]
    on_empty: OnEmpty,

    /// Read `{"type","sdp"}` JSON and write the offer request JSON
    #[arg(long)]
    json: bool,

    /// `video_transform` field of the JSON offer request
    #[arg(long, default_value = DEFAULT_VIDEO_TRANSFORM)]
    video_transform: String,

    /// Write the result here instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OnEmpty {
    Keep,
    Unfiltered,
    Reject,
}

impl From<OnEmpty> for EmptyCodecPolicy {
    fn from(value: OnEmpty) -> Self {
        match value {
            OnEmpty::Keep => EmptyCodecPolicy::Keep,
            OnEmpty::Unfiltered => EmptyCodecPolicy::Unfiltered,
            OnEmpty::Reject => EmptyCodecPolicy::Reject,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("sdp-filter: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(args: &Args) -> codecfilter::Result<()> {
    let input = read_input(args.input.as_ref())?;

    let offer = if args.json {
        SessionDescription::from_json(&input)?
    } else {
        SessionDescription::offer(input)
    };

    let preferences = CodecPreferences::from_selection(&args.audio_codec, &args.video_codec);
    tracing::debug!(?preferences, "filtering offer");
    let prepared = codecfilter::prepare_offer(&offer, &preferences, args.on_empty.into())?;

    let output = if args.json {
        let mut json = OfferRequest::new(prepared, &args.video_transform).to_json()?;
        json.push('\n');
        json
    } else {
        prepared.sdp
    };

    match &args.output {
        Some(path) => fs::write(path, output)?,
        None => io::stdout().write_all(output.as_bytes())?,
    }
    Ok(())
}

fn read_input(path: Option<&PathBuf>) -> io::Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path),
        _ => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}
