//! Shared utilities for integration testing.

use std::io;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tracing_subscriber::fmt::MakeWriter;

/// In-memory writer shared between a handler and the test.
#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct Buffer(Arc<Mutex<Vec<u8>>>);

#[allow(dead_code)]
impl Buffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Buffer {
    type Writer = Buffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Commands received by a mock store, one argument vector per command.
pub type Seen = Arc<Mutex<Vec<Vec<String>>>>;

/// Start a mock store that answers PING with `ping_reply` and everything
/// else with `+OK`.
#[allow(dead_code)]
pub async fn start_mock_store(ping_reply: &'static str) -> (SocketAddr, Seen) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let seen: Seen = Arc::default();
    let log = seen.clone();

    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            tokio::spawn(serve(socket, log.clone(), ping_reply));
        }
    });

    (addr, seen)
}

/// Start a listener that accepts connections and never answers.
#[allow(dead_code)]
pub async fn start_silent_store() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    addr
}

#[allow(dead_code)]
async fn serve(socket: TcpStream, log: Seen, ping_reply: &'static str) {
    let (read, mut write) = socket.into_split();
    let mut reader = BufReader::new(read);

    while let Some(command) = read_command(&mut reader).await {
        let is_ping = command
            .first()
            .is_some_and(|name| name.eq_ignore_ascii_case("PING"));
        let reply = if is_ping { ping_reply } else { "+OK\r\n" };
        log.lock().unwrap().push(command);
        if write.write_all(reply.as_bytes()).await.is_err() {
            break;
        }
    }
}

#[allow(dead_code)]
async fn read_command<R: AsyncBufRead + Unpin>(reader: &mut R) -> Option<Vec<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line).await.ok()? == 0 {
        return None;
    }
    let count: usize = line.trim_end().strip_prefix('*')?.parse().ok()?;

    let mut args = Vec::with_capacity(count);
    for _ in 0..count {
        line.clear();
        reader.read_line(&mut line).await.ok()?;
        let len: usize = line.trim_end().strip_prefix('$')?.parse().ok()?;
        let mut buf = vec![0; len + 2];
        reader.read_exact(&mut buf).await.ok()?;
        buf.truncate(len);
        args.push(String::from_utf8(buf).ok()?);
    }
    Some(args)
}
