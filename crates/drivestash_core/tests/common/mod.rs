#![allow(dead_code)]

use drivestash_core::{KvBackend, RecordFields, StoreError, StoreResult, Volume, VolumeSource};
use std::cell::Cell;
use std::collections::HashMap;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

/// Fixed volume list standing in for the operating system.
pub struct FixtureSource {
    pub volumes: Vec<Volume>,
    pub system_root: Option<String>,
    pub calls: Cell<usize>,
}

impl FixtureSource {
    pub fn new(volumes: Vec<Volume>, system_root: &str) -> Self {
        Self {
            volumes,
            system_root: Some(system_root.to_string()),
            calls: Cell::new(0),
        }
    }

    pub fn windows_desk() -> Self {
        Self::new(
            vec![
                Volume::new("C:\\", "Windows", true),
                Volume::new("D:\\", "", false),
                Volume::new("E:\\", "BLUE 2TB TOSHIBA EXT", true),
                Volume::new("F:\\", "Camera Card", true),
                Volume::new("G:\\", "Camera Card", true),
            ],
            "C:\\",
        )
    }
}

impl VolumeSource for FixtureSource {
    fn volumes(&self) -> io::Result<Vec<Volume>> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.volumes.clone())
    }

    fn system_root(&self) -> Option<String> {
        self.system_root.clone()
    }
}

/// Source whose enumeration always fails.
pub struct FailingSource;

impl VolumeSource for FailingSource {
    fn volumes(&self) -> io::Result<Vec<Volume>> {
        Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "volume list unavailable",
        ))
    }

    fn system_root(&self) -> Option<String> {
        Some("C:\\".to_string())
    }
}

/// Backend whose every call fails like a refused connection.
pub struct UnreachableBackend;

impl KvBackend for UnreachableBackend {
    fn set_fields(&self, _key: &str, _fields: &RecordFields) -> StoreResult<()> {
        Err(refused())
    }

    fn get_all_fields(&self, _key: &str) -> StoreResult<RecordFields> {
        Err(refused())
    }
}

fn refused() -> StoreError {
    StoreError::Redis(redis::RedisError::from(io::Error::new(
        io::ErrorKind::ConnectionRefused,
        "connection refused",
    )))
}

/// Minimal RESP2 server understanding HMSET/HSET and HGETALL.
///
/// Every other command (e.g. `CLIENT SETINFO` at handshake) gets `+OK`.
pub struct FakeRedis {
    pub url: String,
    connections: Arc<AtomicUsize>,
}

impl FakeRedis {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind fake redis");
        let addr = listener.local_addr().expect("fake redis addr");
        let connections = Arc::new(AtomicUsize::new(0));
        let accepted = Arc::clone(&connections);
        let hashes: Arc<Mutex<HashMap<String, RecordFields>>> = Arc::default();

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                accepted.fetch_add(1, Ordering::SeqCst);
                let hashes = Arc::clone(&hashes);
                thread::spawn(move || serve_resp(stream, &hashes));
            }
        });

        Self {
            url: format!("redis://{addr}/"),
            connections,
        }
    }

    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }
}

fn serve_resp(stream: TcpStream, hashes: &Mutex<HashMap<String, RecordFields>>) {
    let Ok(mut writer) = stream.try_clone() else {
        return;
    };
    let mut reader = BufReader::new(stream);

    while let Some(args) = read_command(&mut reader) {
        let Some(verb) = args.first() else { break };
        let reply = match verb.to_ascii_uppercase().as_str() {
            "HMSET" | "HSET" if args.len() >= 4 => {
                let mut hashes = hashes.lock().expect("fake redis lock");
                let hash = hashes.entry(args[1].clone()).or_default();
                let mut added = 0;
                for pair in args[2..].chunks(2) {
                    if let [name, value] = pair {
                        if hash.insert(name.clone(), value.clone()).is_none() {
                            added += 1;
                        }
                    }
                }
                if verb.eq_ignore_ascii_case("HMSET") {
                    "+OK\r\n".to_string()
                } else {
                    format!(":{added}\r\n")
                }
            }
            "HGETALL" if args.len() == 2 => {
                let hashes = hashes.lock().expect("fake redis lock");
                let hash = hashes.get(&args[1]).cloned().unwrap_or_default();
                let mut reply = format!("*{}\r\n", hash.len() * 2);
                for (name, value) in &hash {
                    reply.push_str(&bulk(name));
                    reply.push_str(&bulk(value));
                }
                reply
            }
            _ => "+OK\r\n".to_string(),
        };
        if writer.write_all(reply.as_bytes()).is_err() {
            break;
        }
    }
}

fn bulk(value: &str) -> String {
    format!("${}\r\n{value}\r\n", value.len())
}

fn read_command(reader: &mut impl BufRead) -> Option<Vec<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line).ok()? == 0 {
        return None;
    }
    let count: usize = line.trim_end().strip_prefix('*')?.parse().ok()?;

    let mut args = Vec::with_capacity(count);
    for _ in 0..count {
        line.clear();
        reader.read_line(&mut line).ok()?;
        let len: usize = line.trim_end().strip_prefix('$')?.parse().ok()?;
        let mut buf = vec![0; len + 2];
        reader.read_exact(&mut buf).ok()?;
        buf.truncate(len);
        args.push(String::from_utf8(buf).ok()?);
    }
    Some(args)
}
