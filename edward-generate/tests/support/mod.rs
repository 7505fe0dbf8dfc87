//! Concurrent stream driver for `Generator`.
//!
//! The generator may write before it reads, so input is fed and output is
//! drained on their own threads while the generator runs on the test thread.
//! Both halves are closed by dropping the generator once it returns.

#![allow(dead_code)]

use std::fs;
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

use edward_generate::{GenerateError, Generator, Outcome};

// ---------------------------------------------------------------------------
// In-memory pipe
// ---------------------------------------------------------------------------

pub struct PipeWriter(Sender<Vec<u8>>);

pub struct PipeReader {
    rx: Receiver<Vec<u8>>,
    buf: Vec<u8>,
    pos: usize,
}

pub fn pipe() -> (PipeReader, PipeWriter) {
    let (tx, rx) = channel();
    (
        PipeReader {
            rx,
            buf: Vec::new(),
            pos: 0,
        },
        PipeWriter(tx),
    )
}

impl Write for PipeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        self.0
            .send(buf.to_vec())
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "reader closed"))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Read for PipeReader {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if self.pos == self.buf.len() {
            match self.rx.recv() {
                Ok(chunk) => {
                    self.buf = chunk;
                    self.pos = 0;
                }
                // Every writer dropped: end of stream.
                Err(_) => return Ok(0),
            }
        }
        let n = out.len().min(self.buf.len() - self.pos);
        out[..n].copy_from_slice(&self.buf[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

pub struct Run<'a> {
    pub config: &'a Path,
    pub targets: Vec<PathBuf>,
    pub services: Vec<String>,
    pub force: bool,
    pub group: Option<&'a str>,
    pub input: &'a str,
}

impl<'a> Run<'a> {
    pub fn new(config: &'a Path, target: &Path) -> Self {
        Self {
            config,
            targets: vec![target.to_path_buf()],
            services: Vec::new(),
            force: false,
            group: None,
            input: "",
        }
    }

    pub fn force(mut self) -> Self {
        self.force = true;
        self
    }

    pub fn group(mut self, group: &'a str) -> Self {
        self.group = Some(group);
        self
    }

    pub fn input(mut self, input: &'a str) -> Self {
        self.input = input;
        self
    }
}

pub struct Transcript {
    pub result: Result<Outcome, GenerateError>,
    pub output: String,
}

pub fn run(opts: Run<'_>) -> Transcript {
    let (in_reader, mut in_writer) = pipe();
    let (mut out_reader, out_writer) = pipe();

    let input = opts.input.to_string();
    let feeder = thread::spawn(move || {
        if !input.is_empty() {
            // The generator may finish without reading; a closed pipe is fine.
            let _ = in_writer.write_all(input.as_bytes());
        }
    });
    let drainer = thread::spawn(move || {
        let mut output = String::new();
        out_reader.read_to_string(&mut output).expect("drain output");
        output
    });

    let mut generator = Generator::new(opts.config)
        .with_input(BufReader::new(in_reader))
        .with_output(out_writer);
    let result = generator.generate(&opts.services, opts.force, opts.group, &opts.targets);
    drop(generator);

    feeder.join().expect("feeder thread");
    let output = drainer.join().expect("drainer thread");
    Transcript { result, output }
}

// ---------------------------------------------------------------------------
// Project fixtures
// ---------------------------------------------------------------------------

/// Create a Go `package main` directory at `root/rel`.
pub fn go_service(root: &Path, rel: &str) {
    let dir = root.join(rel);
    fs::create_dir_all(&dir).expect("mkdir");
    fs::write(dir.join("main.go"), "package main\n\nfunc main() {}\n").expect("write main.go");
}

pub fn wrote_to(dir: &Path) -> String {
    format!("Wrote to: {}\n", dir.join("edward.json").display())
}
