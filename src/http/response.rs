//! Download response construction.
//!
//! # Responsibilities
//! - Build the attachment headers for the served file
//! - Stream the file body in bounded chunks
//!
//! # Design Decisions
//! - The body stream owns the file handle: it is closed when the stream is
//!   exhausted, fails, or is dropped because the peer went away
//! - The stream yields exactly the stat'ed length; a short file is an error,
//!   so the response never silently disagrees with `Content-Length`

use std::io;
use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::{Bytes, BytesMut};
use futures_util::stream::{self, Stream};
use tokio::fs::File;
use tokio::io::AsyncReadExt;

/// Read size per body chunk.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// The file handed to every client.
#[derive(Debug, Clone)]
pub struct ServedFile {
    path: PathBuf,
    file_name: String,
}

impl ServedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = base_name(&path);
        Self { path, file_name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Base name used in `Content-Disposition`.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Open the file and build the 200 response streaming its bytes.
    pub async fn open(&self) -> io::Result<Response> {
        let file = File::open(&self.path).await?;
        let len = file.metadata().await?.len();

        let mut response = Body::from_stream(file_stream(file, len)).into_response();
        *response.status_mut() = StatusCode::OK;

        let headers = response.headers_mut();
        headers.insert(
            header::CONTENT_DISPOSITION,
            content_disposition(&self.file_name),
        );
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(len));
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/octet-stream"),
        );

        Ok(response)
    }
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// `attachment; filename="<name>"`, with quotes and backslashes escaped.
pub fn content_disposition(file_name: &str) -> HeaderValue {
    let escaped: String = file_name
        .chars()
        .flat_map(|c| match c {
            '"' | '\\' => vec!['\\', c],
            c if c.is_control() => vec!['_'],
            c => vec![c],
        })
        .collect();

    HeaderValue::from_str(&format!("attachment; filename=\"{escaped}\""))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}

struct FileChunks {
    file: File,
    remaining: u64,
}

/// Stream exactly `len` bytes of `file` in chunks of at most [`CHUNK_SIZE`].
pub fn file_stream(file: File, len: u64) -> impl Stream<Item = io::Result<Bytes>> + Send {
    stream::try_unfold(
        FileChunks {
            file,
            remaining: len,
        },
        |mut state| async move {
            if state.remaining == 0 {
                return Ok(None);
            }

            let want = state.remaining.min(CHUNK_SIZE as u64) as usize;
            let mut buf = BytesMut::with_capacity(want);
            let read = (&mut state.file).take(want as u64).read_buf(&mut buf).await?;

            if read == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("file ended with {} bytes left to send", state.remaining),
                ));
            }

            state.remaining -= read as u64;
            Ok::<_, io::Error>(Some((buf.freeze(), state)))
        },
    )
}
