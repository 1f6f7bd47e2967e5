//! TP-Link Kasa backend: XOR-obfuscated JSON over UDP broadcast discovery
//! and length-prefixed TCP control.

use crate::backend::{DiscoveredDevice, LightingBackend};
use crate::error::Error;
use crate::Result;
use lumensync_core::CapabilityBits;
use serde_json::{json, Value};
use std::io::{Read, Write};
use std::net::{IpAddr, SocketAddr, TcpStream, UdpSocket};
use std::time::Duration;

const KASA_PORT: u16 = 9999;
const XOR_SEED: u8 = 0xAB;

/// Kasa's stream-cipher-style XOR obfuscation: each byte is XORed with the
/// previous *ciphertext* byte, starting from a fixed seed. The same function
/// obfuscates and deobfuscates since XOR is its own inverse.
fn xor_codec(data: &[u8]) -> Vec<u8> {
    let mut key = XOR_SEED;
    data.iter()
        .map(|&b| {
            let out = b ^ key;
            key = out;
            out
        })
        .collect()
}

fn xor_decode(data: &[u8]) -> Vec<u8> {
    let mut key = XOR_SEED;
    data.iter()
        .map(|&b| {
            let out = b ^ key;
            key = b;
            out
        })
        .collect()
}

pub struct KasaTcp {
    addr: Option<SocketAddr>,
}

impl Default for KasaTcp {
    fn default() -> Self {
        Self::new()
    }
}

impl KasaTcp {
    pub fn new() -> Self {
        Self { addr: None }
    }

    fn send_command(&self, command: Value) -> Result<Value> {
        let addr = self.addr.ok_or(Error::Protocol("not connected".into()))?;
        let payload = xor_codec(command.to_string().as_bytes());

        let mut stream = TcpStream::connect(addr)?;
        stream.set_read_timeout(Some(Duration::from_secs(3)))?;

        let len = (payload.len() as u32).to_be_bytes();
        stream.write_all(&len)?;
        stream.write_all(&payload)?;

        let mut len_buf = [0u8; 4];
        stream.read_exact(&mut len_buf)?;
        let reply_len = u32::from_be_bytes(len_buf) as usize;

        let mut reply = vec![0u8; reply_len];
        stream.read_exact(&mut reply)?;
        let decoded = xor_decode(&reply);

        serde_json::from_slice(&decoded).map_err(|e| Error::Protocol(e.to_string()))
    }

    fn set_state(&self, on: Option<bool>, brightness: Option<u8>) -> Result<()> {
        let mut transition = serde_json::Map::new();
        if let Some(on) = on {
            transition.insert("on_off".into(), json!(if on { 1 } else { 0 }));
        }
        if let Some(b) = brightness {
            let ignite = ((b as u32 * 100 + 127) / 255).max(1).min(100);
            transition.insert("ignition_brightness".into(), json!(ignite));
        }
        let command = json!({ "smartlife.iot.smartbulb.lightingservice": { "transition_light_state": transition } });
        self.send_command(command)?;
        Ok(())
    }
}

impl LightingBackend for KasaTcp {
    fn capabilities(&self) -> CapabilityBits {
        CapabilityBits::empty()
            .with(CapabilityBits::BRIGHTNESS)
            .with(CapabilityBits::COLOR)
            .with(CapabilityBits::POWER)
    }

    fn discover(&self, timeout: Duration) -> Result<Vec<DiscoveredDevice>> {
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        socket.set_broadcast(true)?;
        socket.set_read_timeout(Some(timeout))?;

        let probe = xor_codec(json!({ "system": { "get_sysinfo": {} } }).to_string().as_bytes());
        socket.send_to(&probe, (std::net::Ipv4Addr::new(255, 255, 255, 255), KASA_PORT))?;

        let mut devices = Vec::new();
        let mut buf = [0u8; 2048];
        loop {
            match socket.recv_from(&mut buf) {
                Ok((n, from)) => {
                    let decoded = xor_decode(&buf[..n]);
                    let parsed: Result<Value> = serde_json::from_slice(&decoded).map_err(|e| Error::Protocol(e.to_string()));
                    if let Ok(value) = parsed {
                        let label = value.pointer("/system/get_sysinfo/alias").and_then(Value::as_str).map(str::to_string);
                        devices.push(DiscoveredDevice { address: from.ip().to_string(), label });
                    }
                }
                Err(_) => break,
            }
        }

        if devices.is_empty() {
            return Err(Error::NoDevicesFound);
        }
        tracing::debug!(count = devices.len(), "kasa broadcast discovery complete");
        Ok(devices)
    }

    fn connect(&mut self, address: &str) -> Result<()> {
        let ip: IpAddr = address.parse().map_err(|_| Error::Protocol(format!("bad address '{address}'")))?;
        self.addr = Some(SocketAddr::new(ip, KASA_PORT));
        Ok(())
    }

    fn set_color(&mut self, _r: u8, _g: u8, _b: u8) -> Result<()> {
        Err(Error::Unsupported("set_color".into()))
    }

    fn set_brightness(&mut self, brightness: u8) -> Result<()> {
        self.set_state(None, Some(brightness))
    }

    fn set_effect(&mut self, _name: &str) -> Result<()> {
        Err(Error::Unsupported("set_effect".into()))
    }

    fn power(&mut self, on: bool) -> Result<()> {
        self.set_state(Some(on), None)
    }

    fn set_transition(&mut self, _ms: u32) -> Result<()> {
        Err(Error::Unsupported("set_transition".into()))
    }

    fn ping(&mut self) -> Result<()> {
        self.send_command(json!({ "system": { "get_sysinfo": {} } }))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xor_codec_round_trips() {
        let plain = b"{\"system\":{\"get_sysinfo\":{}}}";
        let encoded = xor_codec(plain);
        let decoded = xor_decode(&encoded);
        assert_eq!(decoded, plain);
    }

    #[test]
    fn xor_codec_is_not_identity() {
        let plain = b"hello world";
        assert_ne!(xor_codec(plain), plain);
    }

    #[test]
    fn brightness_rescale_has_a_floor_of_one() {
        let b = 0u8;
        let ignite = ((b as u32 * 100 + 127) / 255).max(1).min(100);
        assert_eq!(ignite, 1);
    }

    #[test]
    fn brightness_rescale_hits_top_at_full_scale() {
        let b = 255u8;
        let ignite = ((b as u32 * 100 + 127) / 255).max(1).min(100);
        assert_eq!(ignite, 100);
    }

    #[test]
    fn color_is_unsupported() {
        let mut backend = KasaTcp::new();
        backend.connect("127.0.0.1").unwrap();
        assert!(matches!(backend.set_color(1, 2, 3), Err(Error::Unsupported(_))));
    }
}
