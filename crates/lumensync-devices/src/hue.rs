//! Philips Hue backend: bridge discovery, single-button pairing, and the
//! `/api/<user>/lights/<id>/state` control surface over plain HTTP.

use crate::backend::{DiscoveredDevice, LightingBackend};
use crate::color::rgb_to_hue_sat;
use crate::error::Error;
use crate::Result;
use lumensync_core::CapabilityBits;
use serde_json::{json, Value};
use std::time::Duration;

const N_UPNP_DISCOVERY_URL: &str = "https://discovery.meethue.com/";

pub struct HueHttp {
    client: reqwest::blocking::Client,
    bridge_addr: Option<String>,
    username: Option<String>,
    light_id: String,
}

impl HueHttp {
    pub fn new(light_id: impl Into<String>) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            bridge_addr: None,
            username: None,
            light_id: light_id.into(),
        }
    }

    fn base_url(&self) -> Result<String> {
        let addr = self.bridge_addr.as_deref().ok_or(Error::Protocol("not connected".into()))?;
        let user = self.username.as_deref().ok_or(Error::Protocol("not paired".into()))?;
        Ok(format!("http://{addr}/api/{user}/lights/{}/state", self.light_id))
    }

    /// POST `devicetype` to `/api` and parse the bridge's pairing response.
    /// The caller must press the bridge's physical link button first; an
    /// `error type 101` response means it hasn't been pressed yet.
    fn pair(&self, bridge_addr: &str) -> Result<String> {
        let body = json!({ "devicetype": "lumensync#pipeline" });
        let resp: Value = self
            .client
            .post(format!("http://{bridge_addr}/api"))
            .json(&body)
            .send()?
            .json()?;

        let entries = resp.as_array().ok_or_else(|| Error::Protocol("pairing response was not a JSON array".into()))?;
        let first = entries.first().ok_or_else(|| Error::Protocol("empty pairing response".into()))?;

        if let Some(username) = first.pointer("/success/username").and_then(Value::as_str) {
            return Ok(username.to_string());
        }
        if let Some(code) = first.pointer("/error/type").and_then(Value::as_i64) {
            if code == 101 {
                return Err(Error::Protocol("link button not pressed".into()));
            }
            return Err(Error::Protocol(format!("bridge returned error type {code}")));
        }
        Err(Error::Protocol("unrecognized pairing response".into()))
    }

    fn put_state(&self, body: Value) -> Result<()> {
        let url = self.base_url()?;
        let resp = self.client.put(url).json(&body).send()?;
        if !resp.status().is_success() {
            return Err(Error::Protocol(format!("bridge returned status {}", resp.status())));
        }
        Ok(())
    }
}

impl LightingBackend for HueHttp {
    fn capabilities(&self) -> CapabilityBits {
        CapabilityBits::empty()
            .with(CapabilityBits::COLOR)
            .with(CapabilityBits::BRIGHTNESS)
            .with(CapabilityBits::TEMPERATURE)
            .with(CapabilityBits::EFFECTS)
            .with(CapabilityBits::TRANSITION)
            .with(CapabilityBits::POWER)
    }

    fn discover(&self, timeout: Duration) -> Result<Vec<DiscoveredDevice>> {
        let resp: Vec<Value> = self
            .client
            .get(N_UPNP_DISCOVERY_URL)
            .timeout(timeout)
            .send()?
            .json()?;

        let devices = resp
            .into_iter()
            .filter_map(|entry| {
                let address = entry.get("internalipaddress")?.as_str()?.to_string();
                let label = entry.get("id").and_then(Value::as_str).map(str::to_string);
                Some(DiscoveredDevice { address, label })
            })
            .collect::<Vec<_>>();

        if devices.is_empty() {
            return Err(Error::NoDevicesFound);
        }
        Ok(devices)
    }

    fn connect(&mut self, address: &str) -> Result<()> {
        let username = self.pair(address)?;
        tracing::debug!(bridge = address, "paired with hue bridge");
        self.bridge_addr = Some(address.to_string());
        self.username = Some(username);
        Ok(())
    }

    fn set_color(&mut self, r: u8, g: u8, b: u8) -> Result<()> {
        let (hue, sat) = rgb_to_hue_sat(r, g, b);
        self.put_state(json!({ "hue": hue, "sat": sat }))
    }

    fn set_brightness(&mut self, brightness: u8) -> Result<()> {
        let bri = ((brightness as u32 * 254 + 127) / 255).min(254) as u8;
        self.put_state(json!({ "bri": bri }))
    }

    fn set_effect(&mut self, name: &str) -> Result<()> {
        let effect = if name.eq_ignore_ascii_case("colorloop") { "colorloop" } else { "none" };
        self.put_state(json!({ "effect": effect }))
    }

    fn power(&mut self, on: bool) -> Result<()> {
        self.put_state(json!({ "on": on }))
    }

    fn set_transition(&mut self, ms: u32) -> Result<()> {
        self.put_state(json!({ "transitiontime": ms / 10 }))
    }

    fn ping(&mut self) -> Result<()> {
        let url = self.base_url()?;
        self.client.get(url).send()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brightness_rescale_hits_both_endpoints() {
        assert_eq!(((0u32 * 254 + 127) / 255).min(254) as u8, 0);
        assert_eq!(((255u32 * 254 + 127) / 255).min(254) as u8, 254);
    }

    #[test]
    fn transition_ms_converts_to_centiseconds() {
        let ms = 500u32;
        assert_eq!(ms / 10, 50);
    }

    #[test]
    fn base_url_requires_pairing_first() {
        let backend = HueHttp::new("1");
        assert!(backend.base_url().is_err());
    }
}
