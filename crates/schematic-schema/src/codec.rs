//! Newline-delimited payload codec for `tokio_util::codec`.

use std::sync::Arc;

use bytes::BytesMut;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::codec::Decoder;

use crate::backend::{Backend, JsonBackend};
use crate::decoder::SchemaDecoder;
use crate::error::{Result, SchemaError};

/// Decodes one validated payload per line.
///
/// Each complete line is run through the shared [`SchemaDecoder`]. A rejected
/// line is yielded as `Some(Err(..))` and decoding continues with the next
/// line; only I/O failures and lines longer than the configured maximum
/// payload size end the stream. Blank lines are skipped and a trailing `\r`
/// is stripped.
pub struct SchemaLineCodec<T, B = JsonBackend> {
    decoder: Arc<SchemaDecoder<T, B>>,
    // Bytes already scanned for a newline.
    scanned: usize,
}

impl<T, B> SchemaLineCodec<T, B> {
    pub fn new(decoder: Arc<SchemaDecoder<T, B>>) -> Self {
        Self {
            decoder,
            scanned: 0,
        }
    }

    /// The decoder shared by this codec.
    pub fn decoder(&self) -> &Arc<SchemaDecoder<T, B>> {
        &self.decoder
    }
}

impl<T, B> Decoder for SchemaLineCodec<T, B>
where
    T: Serialize + DeserializeOwned,
    B: Backend,
{
    type Item = Result<T>;
    type Error = SchemaError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        loop {
            let Some(offset) = src[self.scanned..].iter().position(|b| *b == b'\n') else {
                self.scanned = src.len();
                let max = self.decoder.config().max_payload_size;
                if src.len() > max {
                    return Err(SchemaError::PayloadTooLarge {
                        size: src.len(),
                        max,
                    });
                }
                return Ok(None);
            };

            let end = self.scanned + offset;
            self.scanned = 0;
            let line = src.split_to(end + 1);
            let payload = trim_line(&line[..end]);
            if is_blank(payload) {
                continue;
            }
            return Ok(Some(self.decoder.try_decode(payload)));
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        if let Some(item) = self.decode(src)? {
            return Ok(Some(item));
        }

        self.scanned = 0;
        let rest = src.split();
        let payload = trim_line(&rest);
        if is_blank(payload) {
            return Ok(None);
        }
        Ok(Some(self.decoder.try_decode(payload)))
    }
}

fn trim_line(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn is_blank(line: &[u8]) -> bool {
    line.iter().all(u8::is_ascii_whitespace)
}
