//! MagicHome / Flux-style backend: UDP broadcast discovery and a raw
//! checksummed byte protocol over TCP.

use crate::backend::{DiscoveredDevice, LightingBackend};
use crate::error::Error;
use crate::Result;
use lumensync_core::CapabilityBits;
use std::io::{Read, Write};
use std::net::{IpAddr, SocketAddr, TcpStream, UdpSocket};
use std::time::Duration;

const DISCOVERY_PORT: u16 = 48899;
const CONTROL_PORT: u16 = 5577;
const DISCOVERY_PROBE: &[u8] = b"HF-A11ASSISTHREAD";

/// Sum of all preceding bytes, mod 256 — MagicHome's frame checksum.
fn checksum(frame: &[u8]) -> u8 {
    frame.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

fn framed(mut body: Vec<u8>) -> Vec<u8> {
    let cs = checksum(&body);
    body.push(cs);
    body
}

pub struct MagicHomeTcp {
    addr: Option<SocketAddr>,
}

impl Default for MagicHomeTcp {
    fn default() -> Self {
        Self::new()
    }
}

impl MagicHomeTcp {
    pub fn new() -> Self {
        Self { addr: None }
    }

    fn send_frame(&self, frame: Vec<u8>) -> Result<()> {
        let addr = self.addr.ok_or(Error::Protocol("not connected".into()))?;
        let mut stream = TcpStream::connect(addr)?;
        stream.set_read_timeout(Some(Duration::from_secs(2)))?;
        stream.write_all(&frame)?;

        // The device always replies with an ack frame; its contents aren't
        // validated here since firmware responses vary across clone
        // controllers and don't carry information this backend acts on.
        let mut ack = [0u8; 64];
        let _ = stream.read(&mut ack);
        Ok(())
    }
}

impl LightingBackend for MagicHomeTcp {
    fn capabilities(&self) -> CapabilityBits {
        CapabilityBits::empty()
            .with(CapabilityBits::COLOR)
            .with(CapabilityBits::EFFECTS)
            .with(CapabilityBits::POWER)
    }

    fn discover(&self, timeout: Duration) -> Result<Vec<DiscoveredDevice>> {
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        socket.set_broadcast(true)?;
        socket.set_read_timeout(Some(timeout))?;
        socket.send_to(DISCOVERY_PROBE, (std::net::Ipv4Addr::new(255, 255, 255, 255), DISCOVERY_PORT))?;

        let mut devices = Vec::new();
        let mut buf = [0u8; 128];
        loop {
            match socket.recv_from(&mut buf) {
                Ok((n, from)) => {
                    // Vendor reply is a comma-separated ASCII triple: IP,MAC,model.
                    let text = String::from_utf8_lossy(&buf[..n]);
                    let label = text.split(',').nth(2).map(str::to_string);
                    devices.push(DiscoveredDevice { address: from.ip().to_string(), label });
                }
                Err(_) => break,
            }
        }

        if devices.is_empty() {
            return Err(Error::NoDevicesFound);
        }
        tracing::debug!(count = devices.len(), "magichome broadcast discovery complete");
        Ok(devices)
    }

    fn connect(&mut self, address: &str) -> Result<()> {
        let ip: IpAddr = address.parse().map_err(|_| Error::Protocol(format!("bad address '{address}'")))?;
        self.addr = Some(SocketAddr::new(ip, CONTROL_PORT));
        Ok(())
    }

    fn set_color(&mut self, r: u8, g: u8, b: u8) -> Result<()> {
        self.send_frame(framed(vec![0x31, r, g, b, 0x00, 0x0F]))
    }

    fn set_brightness(&mut self, _brightness: u8) -> Result<()> {
        Err(Error::Unsupported("set_brightness".into()))
    }

    fn set_effect(&mut self, name: &str) -> Result<()> {
        let mode = effect_mode_byte(name).ok_or_else(|| Error::Unsupported(format!("effect '{name}'")))?;
        self.send_frame(framed(vec![0x61, mode, 0x1F]))
    }

    fn power(&mut self, on: bool) -> Result<()> {
        let flag = if on { 0x23 } else { 0x24 };
        self.send_frame(framed(vec![0x71, flag, 0x0F]))
    }

    fn set_transition(&mut self, _ms: u32) -> Result<()> {
        Err(Error::Unsupported("set_transition".into()))
    }

    fn ping(&mut self) -> Result<()> {
        self.send_frame(framed(vec![0x81, 0x8A, 0x8B]))
    }
}

fn effect_mode_byte(name: &str) -> Option<u8> {
    match name.to_ascii_lowercase().as_str() {
        "seven_color_jump" => Some(0x25),
        "seven_color_strobe" => Some(0x30),
        "colorloop" | "seven_color_fade" => Some(0x26),
        "red_fade" => Some(0x2B),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_is_sum_mod_256() {
        assert_eq!(checksum(&[0x31, 0xFF, 0x00, 0x00]), 0x30);
    }

    #[test]
    fn framed_appends_checksum_byte() {
        let frame = framed(vec![0x71, 0x23, 0x0F]);
        assert_eq!(frame.len(), 4);
        assert_eq!(*frame.last().unwrap(), checksum(&[0x71, 0x23, 0x0F]));
    }

    #[test]
    fn unknown_effect_name_is_unsupported() {
        assert_eq!(effect_mode_byte("not_a_real_effect"), None);
    }

    #[test]
    fn colorloop_maps_to_a_known_mode_byte() {
        assert_eq!(effect_mode_byte("colorloop"), Some(0x26));
    }

    #[test]
    fn brightness_is_unsupported_on_rgb_only_controllers() {
        let mut backend = MagicHomeTcp::new();
        backend.connect("127.0.0.1").unwrap();
        assert!(matches!(backend.set_brightness(100), Err(Error::Unsupported(_))));
    }
}
