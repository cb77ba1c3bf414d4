use std::net::SocketAddr;
use tokio::net::TcpStream;

use shared::WireError;

// Connected player socket plus the protocol operations the game performs on it
#[derive(Debug)]
pub struct PlayerConn {
    stream: TcpStream,
    addr: SocketAddr,
}

impl PlayerConn {
    pub fn new(stream: TcpStream, addr: SocketAddr) -> Self {
        PlayerConn { stream, addr }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub async fn recv_nickname(&mut self) -> Result<String, WireError> {
        shared::read_text_frame(&mut self.stream).await
    }

    pub async fn send_word_len(&mut self, len: u32) -> Result<(), WireError> {
        shared::write_word_len(&mut self.stream, len).await
    }

    pub async fn recv_guess(&mut self) -> Result<u8, WireError> {
        shared::read_guess(&mut self.stream).await
    }

    pub async fn send_progress(&mut self, progress: &[bool]) -> Result<(), WireError> {
        shared::write_progress(&mut self.stream, progress).await
    }

    pub async fn recv_ready(&mut self) -> Result<u8, WireError> {
        shared::read_ready(&mut self.stream).await
    }

    pub async fn send_report(&mut self, report: &str) -> Result<(), WireError> {
        shared::write_text_frame(&mut self.stream, report).await
    }
}
