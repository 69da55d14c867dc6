#![forbid(unsafe_code)]

use super::framing::{Framing, parse_request, read_content_length_frame};
use crate::McpServer;
use std::io::{BufRead, BufReader};

pub(crate) fn run_stdio(server: &mut McpServer) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = std::io::stdin();
    let mut reader = BufReader::new(stdin.lock());
    let mut stdout = std::io::stdout().lock();

    let mut framing: Option<Framing> = None;

    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            break;
        }

        let mode = match framing {
            Some(mode) => mode,
            None => {
                let Some(detected) = Framing::detect(&line) else {
                    continue;
                };
                server.session_log.note_mode(detected.as_str());
                framing = Some(detected);
                detected
            }
        };

        let body = match mode {
            Framing::NewlineJson => {
                let raw = line.trim();
                if raw.is_empty() {
                    continue;
                }
                raw.as_bytes().to_vec()
            }
            Framing::ContentLength => {
                if line.trim().is_empty() {
                    continue;
                }
                let Some(body) = read_content_length_frame(&mut reader, line)? else {
                    break;
                };
                body
            }
        };

        let resp = match parse_request(&body) {
            Ok(request) => server.handle(request),
            Err(resp) => {
                server.session_log.note_error("malformed JSON-RPC message");
                Some(resp)
            }
        };
        if let Some(resp) = resp {
            mode.write(&mut stdout, &resp)?;
        }
    }

    Ok(())
}
