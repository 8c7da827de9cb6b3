use paulstretch::io::raw::{BlockReader, BlockWriter};
use paulstretch::io::wav::{read_wav_file, write_wav_file};
use paulstretch::{stretch_buffer, StretchError, StretchParams, Stretcher};

/// Default stretch ratio when none is given.
const DEFAULT_RATIO: f64 = 8.0;
/// Window duration in seconds when sizing from the sample rate.
const DEFAULT_WINDOW_SECS: f64 = 0.25;
/// Assumed sample rate for raw streams.
const DEFAULT_RAW_SAMPLE_RATE: u32 = 44100;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    let input_path = &args[1];
    let output_path = &args[2];

    let mut ratio = DEFAULT_RATIO;
    let mut window_size: Option<usize> = None;
    let mut window_secs = DEFAULT_WINDOW_SECS;
    let mut seed: Option<u64> = None;
    let mut raw = false;
    let mut raw_sample_rate = DEFAULT_RAW_SAMPLE_RATE;
    let mut float_format = false;
    let mut verbose = false;

    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "--ratio" | "-r" => {
                i += 1;
                ratio = parse_f64(&args, i, "ratio");
            }
            "--window-size" | "-w" => {
                i += 1;
                window_size = Some(parse_usize(&args, i, "window-size"));
            }
            "--window-secs" => {
                i += 1;
                window_secs = parse_f64(&args, i, "window-secs");
            }
            "--seed" => {
                i += 1;
                seed = Some(parse_u64(&args, i, "seed"));
            }
            "--raw" => raw = true,
            "--sample-rate" => {
                i += 1;
                raw_sample_rate = parse_usize(&args, i, "sample-rate") as u32;
            }
            "--float" => float_format = true,
            "--verbose" | "-v" => verbose = true,
            other => {
                eprintln!("unknown option: {}", other);
                print_usage(&args[0]);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let result = if raw {
        run_raw(
            input_path,
            output_path,
            ratio,
            window_size,
            window_secs,
            raw_sample_rate,
            seed,
            verbose,
        )
    } else {
        run_wav(
            input_path,
            output_path,
            ratio,
            window_size,
            window_secs,
            seed,
            float_format,
            verbose,
        )
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[allow(clippy::too_many_arguments)]
fn run_wav(
    input_path: &str,
    output_path: &str,
    ratio: f64,
    window_size: Option<usize>,
    window_secs: f64,
    seed: Option<u64>,
    float_format: bool,
    verbose: bool,
) -> Result<(), StretchError> {
    let buffer = read_wav_file(input_path)?;
    let window = window_size.unwrap_or_else(|| sized_window(window_secs, buffer.sample_rate));

    if verbose {
        eprintln!(
            "input: {} ch, {} Hz, {:.2} s",
            buffer.channels,
            buffer.sample_rate,
            buffer.duration_secs()
        );
        eprintln!("ratio {}, window {} samples", ratio, window);
    }

    let mut params = StretchParams::new(ratio).with_window_size(window);
    if let Some(seed) = seed {
        params = params.with_seed(seed);
    }

    let stretched = stretch_buffer(&buffer, &params)?;
    write_wav_file(output_path, &stretched, float_format)?;

    if verbose {
        eprintln!("output: {:.2} s", stretched.duration_secs());
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_raw(
    input_path: &str,
    output_path: &str,
    ratio: f64,
    window_size: Option<usize>,
    window_secs: f64,
    sample_rate: u32,
    seed: Option<u64>,
    verbose: bool,
) -> Result<(), StretchError> {
    let window = window_size.unwrap_or_else(|| sized_window(window_secs, sample_rate));

    let mut params = StretchParams::new(ratio).with_window_size(window);
    if let Some(seed) = seed {
        params = params.with_seed(seed);
    }
    let mut engine = Stretcher::new(&params)?;

    let input = std::fs::File::open(input_path)
        .map_err(|e| StretchError::IoError(format!("{}: {}", input_path, e)))?;
    let output = std::fs::File::create(output_path)
        .map_err(|e| StretchError::IoError(format!("{}: {}", output_path, e)))?;

    let mut reader = BlockReader::new(std::io::BufReader::new(input), window);
    let mut writer = BlockWriter::new(std::io::BufWriter::new(output));

    let mut block = vec![0.0f32; window];
    let mut blocks_in: u64 = 0;
    let mut blocks_out: u64 = 0;

    while reader.read_block(&mut block)? {
        engine.write(&block)?;
        blocks_in += 1;
        while let Some(out) = engine.read() {
            writer.write_block(out)?;
            blocks_out += 1;
        }
    }
    writer.flush()?;

    if verbose {
        eprintln!("{} blocks in, {} blocks out", blocks_in, blocks_out);
    }
    Ok(())
}

/// Window size from a duration and sample rate, floored at the engine minimum.
fn sized_window(secs: f64, sample_rate: u32) -> usize {
    ((secs * sample_rate as f64) as usize).max(2)
}

fn parse_f64(args: &[String], i: usize, name: &str) -> f64 {
    args.get(i)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            eprintln!("invalid or missing value for --{}", name);
            std::process::exit(1);
        })
}

fn parse_u64(args: &[String], i: usize, name: &str) -> u64 {
    args.get(i)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            eprintln!("invalid or missing value for --{}", name);
            std::process::exit(1);
        })
}

fn parse_usize(args: &[String], i: usize, name: &str) -> usize {
    args.get(i)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            eprintln!("invalid or missing value for --{}", name);
            std::process::exit(1);
        })
}

fn print_usage(program: &str) {
    eprintln!("usage: {} <input> <output> [options]", program);
    eprintln!();
    eprintln!("options:");
    eprintln!("  --ratio, -r <R>        stretch ratio, >= 1.0 (default {})", DEFAULT_RATIO);
    eprintln!("  --window-size, -w <N>  window size in samples");
    eprintln!(
        "  --window-secs <S>      window duration in seconds (default {})",
        DEFAULT_WINDOW_SECS
    );
    eprintln!("  --seed <K>             explicit phase-randomization seed");
    eprintln!("  --raw                  treat files as headerless mono f32le");
    eprintln!(
        "  --sample-rate <SR>     sample rate for raw input (default {})",
        DEFAULT_RAW_SAMPLE_RATE
    );
    eprintln!("  --float                write 32-bit float WAV instead of 16-bit PCM");
    eprintln!("  --verbose, -v          report stream details to stderr");
}
