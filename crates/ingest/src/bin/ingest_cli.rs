use std::env;
use std::fs::File;
use std::io::{self, BufReader, Write};

use ingest::{ParsedBatch, records_from_reader};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("usage: cdr-parse <path|->");
        std::process::exit(2);
    }

    let path = &args[1];
    let batch = if path == "-" {
        records_from_reader(io::stdin().lock())
    } else {
        let file = File::open(path).unwrap_or_else(|err| {
            eprintln!("failed to open {}: {}", path, err);
            std::process::exit(1);
        });
        records_from_reader(BufReader::new(file))
    };

    let parsed = print_batch(batch).unwrap_or_else(|err| {
        eprintln!("failed to write output: {}", err);
        std::process::exit(1);
    });
    if parsed == 0 {
        eprintln!("no cdr records parsed");
        std::process::exit(3);
    }
}

fn print_batch(batch: ParsedBatch) -> io::Result<usize> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut parsed = 0usize;
    for line in batch.lines {
        match line.result {
            Ok(record) => {
                serde_json::to_writer(&mut out, &record)?;
                writeln!(out)?;
                parsed += 1;
            }
            Err(failure) => eprintln!("line {}: {}", line.line_number, failure),
        }
    }
    if let Some(err) = batch.read_error {
        eprintln!("read error: {}", err);
    }
    Ok(parsed)
}
