use std::io::Write as _;
use std::net::{Shutdown, TcpStream, UdpSocket};

use crate::foundation::error::{VoxError, VoxResult};
use crate::render::raster::MonochromeBuffer;
use crate::transport::sink::FrameTransport;

/// Stream transport: each frame is one `write_all` on a connected TCP socket.
#[derive(Debug)]
pub struct TcpTransport {
    peer: String,
    stream: Option<TcpStream>,
}

impl TcpTransport {
    /// Connect to the panel controller with Nagle disabled so frames leave immediately.
    pub fn connect(host: &str, port: u16) -> VoxResult<Self> {
        let peer = format!("{host}:{port}");
        let stream = TcpStream::connect((host, port))
            .map_err(|e| VoxError::transport(format!("connect to {peer}: {e}")))?;
        stream
            .set_nodelay(true)
            .map_err(|e| VoxError::transport(format!("set TCP_NODELAY on {peer}: {e}")))?;
        tracing::info!(%peer, "connected");
        Ok(Self {
            peer,
            stream: Some(stream),
        })
    }

    /// `host:port` of the controller.
    pub fn peer(&self) -> &str {
        &self.peer
    }
}

impl FrameTransport for TcpTransport {
    fn send_frame(&mut self, frame: &MonochromeBuffer) -> VoxResult<()> {
        let Some(stream) = self.stream.as_mut() else {
            return Err(VoxError::transport(format!(
                "connection to {} is already closed",
                self.peer
            )));
        };
        stream
            .write_all(frame.as_bytes())
            .map_err(|e| VoxError::transport(format!("send to {}: {e}", self.peer)))
    }

    fn close(&mut self) -> VoxResult<()> {
        if let Some(stream) = self.stream.take() {
            stream
                .shutdown(Shutdown::Both)
                .map_err(|e| VoxError::transport(format!("close {}: {e}", self.peer)))?;
            tracing::info!(peer = %self.peer, "disconnected");
        }
        Ok(())
    }
}

/// Datagram transport: each frame is exactly one UDP datagram.
#[derive(Debug)]
pub struct UdpTransport {
    peer: String,
    socket: Option<UdpSocket>,
}

impl UdpTransport {
    /// Bind an ephemeral local port and fix the controller as the only peer.
    pub fn connect(host: &str, port: u16) -> VoxResult<Self> {
        let peer = format!("{host}:{port}");
        let socket = UdpSocket::bind(("0.0.0.0", 0))
            .map_err(|e| VoxError::transport(format!("bind local UDP socket: {e}")))?;
        socket
            .connect((host, port))
            .map_err(|e| VoxError::transport(format!("connect to {peer}: {e}")))?;
        tracing::debug!(%peer, "udp socket ready");
        Ok(Self {
            peer,
            socket: Some(socket),
        })
    }

    /// `host:port` of the controller.
    pub fn peer(&self) -> &str {
        &self.peer
    }
}

impl FrameTransport for UdpTransport {
    fn send_frame(&mut self, frame: &MonochromeBuffer) -> VoxResult<()> {
        let Some(socket) = self.socket.as_ref() else {
            return Err(VoxError::transport(format!(
                "socket for {} is already closed",
                self.peer
            )));
        };
        let bytes = frame.as_bytes();
        let sent = socket
            .send(bytes)
            .map_err(|e| VoxError::transport(format!("send to {}: {e}", self.peer)))?;
        if sent != bytes.len() {
            return Err(VoxError::transport(format!(
                "short datagram to {}: {sent} of {} bytes",
                self.peer,
                bytes.len()
            )));
        }
        Ok(())
    }

    fn close(&mut self) -> VoxResult<()> {
        self.socket = None;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transport/net.rs"]
mod tests;
