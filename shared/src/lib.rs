use std::io::ErrorKind;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

pub const DEFAULT_PORT: u16 = 8080;
pub const MAX_GUESSES: u8 = 8;
pub const NUM_ROUNDS: u32 = 5;
pub const READY_SENTINEL: u8 = b'R';
pub const MAX_FRAME_LEN: usize = 255;

/// Transport-level failures observed on a single player connection.
///
/// `Closed` and `Io` are equivalent for game-state purposes (the player is
/// gone either way) but stay separate so logs can tell a voluntary departure
/// from a transport fault.
#[derive(Debug, Error)]
pub enum WireError {
    #[error("peer closed the connection")]
    Closed,
    #[error("transport error: {0}")]
    Io(std::io::Error),
    #[error("frame of {len} bytes exceeds the 255-byte limit")]
    FrameTooLong { len: usize },
}

impl From<std::io::Error> for WireError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            ErrorKind::UnexpectedEof
            | ErrorKind::BrokenPipe
            | ErrorKind::ConnectionReset
            | ErrorKind::ConnectionAborted => WireError::Closed,
            _ => WireError::Io(err),
        }
    }
}

/// Writes a length-prefixed text frame: one unsigned length byte followed by
/// exactly that many bytes of text, no terminator. Nicknames and leaderboard
/// reports share this shape.
pub async fn write_text_frame<W>(writer: &mut W, text: &str) -> Result<(), WireError>
where
    W: AsyncWrite + Unpin,
{
    let bytes = text.as_bytes();
    if bytes.len() > MAX_FRAME_LEN {
        return Err(WireError::FrameTooLong { len: bytes.len() });
    }
    writer.write_all(&[bytes.len() as u8]).await?;
    writer.write_all(bytes).await?;
    Ok(())
}

/// Reads a length-prefixed text frame. Payload bytes are decoded as UTF-8
/// with lossy replacement.
pub async fn read_text_frame<R>(reader: &mut R) -> Result<String, WireError>
where
    R: AsyncRead + Unpin,
{
    let len = reader.read_u8().await?;
    let mut buf = vec![0u8; len as usize];
    reader.read_exact(&mut buf).await?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Word length at round start: 4-byte unsigned integer, little-endian.
pub async fn write_word_len<W>(writer: &mut W, len: u32) -> Result<(), WireError>
where
    W: AsyncWrite + Unpin,
{
    writer.write_u32_le(len).await?;
    Ok(())
}

pub async fn read_word_len<R>(reader: &mut R) -> Result<u32, WireError>
where
    R: AsyncRead + Unpin,
{
    Ok(reader.read_u32_le().await?)
}

/// One guess is a single raw byte. The server compares it against the word's
/// bytes as-is; anything that never occurs in the word is simply wrong.
pub async fn write_guess<W>(writer: &mut W, guess: u8) -> Result<(), WireError>
where
    W: AsyncWrite + Unpin,
{
    writer.write_u8(guess).await?;
    Ok(())
}

pub async fn read_guess<R>(reader: &mut R) -> Result<u8, WireError>
where
    R: AsyncRead + Unpin,
{
    Ok(reader.read_u8().await?)
}

/// Renders a progress vector as `'1'`/`'0'` bytes, one per letter position.
pub fn render_progress(progress: &[bool]) -> Vec<u8> {
    progress
        .iter()
        .map(|revealed| if *revealed { b'1' } else { b'0' })
        .collect()
}

pub async fn write_progress<W>(writer: &mut W, progress: &[bool]) -> Result<(), WireError>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(&render_progress(progress)).await?;
    Ok(())
}

/// Reads a progress vector of `len` positions.
pub async fn read_progress<R>(reader: &mut R, len: usize) -> Result<Vec<bool>, WireError>
where
    R: AsyncRead + Unpin,
{
    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf).await?;
    Ok(buf.iter().map(|b| *b == b'1').collect())
}

/// Between rounds every surviving player confirms with the ready sentinel.
pub async fn write_ready<W>(writer: &mut W) -> Result<(), WireError>
where
    W: AsyncWrite + Unpin,
{
    writer.write_u8(READY_SENTINEL).await?;
    Ok(())
}

/// Reads the ready byte without validating it; the caller decides what a
/// mismatching sentinel means.
pub async fn read_ready<R>(reader: &mut R) -> Result<u8, WireError>
where
    R: AsyncRead + Unpin,
{
    Ok(reader.read_u8().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::io::Builder;

    #[tokio::test]
    async fn read_text_frame_assembles_nickname() {
        let mut mock = Builder::new().read(&[5]).read(b"alice").build();
        let name = read_text_frame(&mut mock).await.unwrap();
        assert_eq!(name, "alice");
    }

    #[tokio::test]
    async fn read_text_frame_allows_empty_payload() {
        let mut mock = Builder::new().read(&[0]).build();
        let name = read_text_frame(&mut mock).await.unwrap();
        assert_eq!(name, "");
    }

    #[tokio::test]
    async fn read_text_frame_reports_close_before_length() {
        let mut mock = Builder::new().build();
        match read_text_frame(&mut mock).await {
            Err(WireError::Closed) => {}
            other => panic!("expected Closed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn read_text_frame_reports_close_mid_payload() {
        let mut mock = Builder::new().read(&[5]).read(b"al").build();
        match read_text_frame(&mut mock).await {
            Err(WireError::Closed) => {}
            other => panic!("expected Closed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn write_text_frame_emits_length_prefix_then_bytes() {
        let mut mock = Builder::new().write(&[3]).write(b"bob").build();
        write_text_frame(&mut mock, "bob").await.unwrap();
    }

    #[tokio::test]
    async fn write_text_frame_rejects_oversized_payload() {
        let mut mock = Builder::new().build();
        let oversized = "x".repeat(MAX_FRAME_LEN + 1);
        match write_text_frame(&mut mock, &oversized).await {
            Err(WireError::FrameTooLong { len }) => assert_eq!(len, MAX_FRAME_LEN + 1),
            other => panic!("expected FrameTooLong, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn word_len_is_four_bytes_little_endian() {
        let mut mock = Builder::new().write(&[7, 0, 0, 0]).build();
        write_word_len(&mut mock, 7).await.unwrap();

        let mut mock = Builder::new().read(&[7, 0, 0, 0]).build();
        assert_eq!(read_word_len(&mut mock).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn guess_is_one_raw_byte() {
        let mut mock = Builder::new().write(b"e").build();
        write_guess(&mut mock, b'e').await.unwrap();

        let mut mock = Builder::new().read(b"q").build();
        assert_eq!(read_guess(&mut mock).await.unwrap(), b'q');
    }

    #[test]
    fn progress_renders_ones_and_zeroes() {
        assert_eq!(render_progress(&[true, false, true]), b"101".to_vec());
        assert_eq!(render_progress(&[]), Vec::<u8>::new());
    }

    #[tokio::test]
    async fn progress_roundtrip_over_the_wire() {
        let mut mock = Builder::new().write(b"010").build();
        write_progress(&mut mock, &[false, true, false])
            .await
            .unwrap();

        let mut mock = Builder::new().read(b"110").build();
        let progress = read_progress(&mut mock, 3).await.unwrap();
        assert_eq!(progress, vec![true, true, false]);
    }

    #[tokio::test]
    async fn ready_writes_the_sentinel() {
        let mut mock = Builder::new().write(&[READY_SENTINEL]).build();
        write_ready(&mut mock).await.unwrap();

        let mut mock = Builder::new().read(&[b'X']).build();
        assert_eq!(read_ready(&mut mock).await.unwrap(), b'X');
    }

    #[test]
    fn io_errors_fold_peer_hangups_into_closed() {
        let eof = std::io::Error::new(ErrorKind::UnexpectedEof, "eof");
        assert!(matches!(WireError::from(eof), WireError::Closed));

        let pipe = std::io::Error::new(ErrorKind::BrokenPipe, "pipe");
        assert!(matches!(WireError::from(pipe), WireError::Closed));

        let refused = std::io::Error::new(ErrorKind::ConnectionRefused, "refused");
        assert!(matches!(WireError::from(refused), WireError::Io(_)));
    }
}
