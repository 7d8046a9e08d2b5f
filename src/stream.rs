use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::time::{Duration, Instant};

use crate::annotate::{self, FrameAnnotations};
use crate::config::Config;
use crate::detection::Frame;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    pub frames: u64,
    pub faces: u64,
    pub skipped: u64,
}

fn process_line(index: u64, line: &[u8], cfg: &Config) -> Result<FrameAnnotations> {
    let mut frame: Frame = serde_json::from_slice(line).context("parsing detection frame")?;
    if let Some(display) = cfg.display {
        frame = frame.resize(display)?;
    }
    Ok(annotate::annotate_frame(index, &frame, &cfg.overlay))
}

/// Annotate a JSON-lines stream of detection frames.
///
/// Frames that fail to parse (including lines that are not UTF-8) are logged
/// and skipped; the frame counter still advances so output indices line up
/// with input lines. Only I/O errors end the run. With `realtime` set, output
/// is paced to one frame per `frame_interval_ms`.
pub fn run<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    cfg: &Config,
    realtime: bool,
) -> Result<StreamStats> {
    let interval = Duration::from_millis(cfg.frame_interval_ms);
    let mut stats = StreamStats::default();
    let mut index = 0;
    let mut line = Vec::new();

    loop {
        line.clear();
        let read = input
            .read_until(b'\n', &mut line)
            .context("reading detection stream")?;
        if read == 0 {
            break;
        }
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        let started = Instant::now();

        match process_line(index, &line, cfg) {
            Ok(annotations) => {
                stats.frames += 1;
                stats.faces += annotations.faces.len() as u64;
                serde_json::to_writer(&mut output, &annotations)?;
                writeln!(output)?;
            }
            Err(e) => {
                log::warn!("Frame {}: {:#}", index, e);
                stats.skipped += 1;
            }
        }
        index += 1;

        if realtime {
            output.flush()?;
            if let Some(rest) = interval.checked_sub(started.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }

    output.flush()?;
    Ok(stats)
}
