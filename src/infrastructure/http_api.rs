// Sensor node HTTP adapter
use std::collections::HashMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use crate::application::monitor_api::{CreateOutcome, MonitorApi};
use crate::domain::event::{EventDetail, EventSummary, EventWithLogs, RecordingStatus};
use crate::domain::log_record::LogRecord;
use crate::domain::snapshot::{PhaseReading, SensorSnapshot, PHASE_COUNT};

#[derive(Debug, Clone)]
pub struct HttpMonitorApi {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct SnapshotDto {
    timestamp: f64,
    #[serde(default)]
    sensors: HashMap<String, Option<PhaseDto>>,
    #[serde(default)]
    neutral_current: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct PhaseDto {
    #[serde(default)]
    voltage: Option<f64>,
    #[serde(default)]
    current: Option<f64>,
    #[serde(default)]
    power: Option<f64>,
    #[serde(default)]
    energy: Option<f64>,
    #[serde(default)]
    frequency: Option<f64>,
    #[serde(default)]
    pf: Option<f64>,
}

impl SnapshotDto {
    fn into_snapshot(self) -> SensorSnapshot {
        let mut phases: [Option<PhaseReading>; PHASE_COUNT] = [None; PHASE_COUNT];
        for (address, phase) in self.sensors {
            match address.parse::<usize>() {
                Ok(n) if (1..=PHASE_COUNT).contains(&n) => {
                    phases[n - 1] = phase.map(|p| PhaseReading {
                        voltage: p.voltage,
                        current: p.current,
                        power: p.power,
                        energy: p.energy,
                        frequency: p.frequency,
                        pf: p.pf,
                    });
                }
                _ => tracing::warn!(%address, "ignoring reading from unknown sensor address"),
            }
        }
        SensorSnapshot {
            timestamp: self.timestamp,
            phases,
            neutral_current: self.neutral_current,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AckDto {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreateDto {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    event_id: Option<i64>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EventWithLogsDto {
    details: Option<EventDetail>,
    #[serde(default)]
    logs: Vec<LogRecord>,
}

impl HttpMonitorApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response, path: &str) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("{path} failed with status {status}: {body}");
        }
        response
            .json::<T>()
            .await
            .with_context(|| format!("failed to decode {path} response"))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .with_context(|| format!("request to {path} failed"))?;
        Self::decode(response, path).await
    }

    async fn expect_ack(response: reqwest::Response, path: &str) -> Result<()> {
        let ack: AckDto = Self::decode(response, path).await?;
        if !ack.success {
            anyhow::bail!(
                "{path} rejected: {}",
                ack.error.unwrap_or_else(|| "unspecified error".to_string())
            );
        }
        Ok(())
    }

    async fn post_ack(&self, path: &str, body: serde_json::Value) -> Result<()> {
        let response = self
            .client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .with_context(|| format!("request to {path} failed"))?;
        Self::expect_ack(response, path).await
    }
}

#[async_trait]
impl MonitorApi for HttpMonitorApi {
    async fn latest_snapshot(&self) -> Result<SensorSnapshot> {
        let dto: SnapshotDto = self.get_json("/api/data").await?;
        Ok(dto.into_snapshot())
    }

    async fn history(&self, limit: usize) -> Result<Vec<LogRecord>> {
        self.get_json(&format!("/api/history?limit={limit}")).await
    }

    async fn list_events(&self) -> Result<Vec<EventSummary>> {
        self.get_json("/api/events").await
    }

    async fn create_event(&self, name: &str) -> Result<CreateOutcome> {
        let path = "/api/events";
        let response = self
            .client
            .post(self.url(path))
            .json(&json!({ "name": name }))
            .send()
            .await
            .with_context(|| format!("request to {path} failed"))?;
        let ack: CreateDto = Self::decode(response, path).await?;
        Ok(match (ack.success, ack.event_id) {
            (true, Some(id)) => CreateOutcome::Created(id),
            _ => CreateOutcome::Rejected(
                ack.error
                    .unwrap_or_else(|| "event was not created".to_string()),
            ),
        })
    }

    async fn rename_event(&self, id: i64, name: &str) -> Result<()> {
        let path = format!("/api/events/{id}");
        let response = self
            .client
            .put(self.url(&path))
            .json(&json!({ "name": name }))
            .send()
            .await
            .with_context(|| format!("request to {path} failed"))?;
        Self::expect_ack(response, &path).await
    }

    async fn delete_event(&self, id: i64) -> Result<()> {
        let path = format!("/api/events/{id}");
        let response = self
            .client
            .delete(self.url(&path))
            .send()
            .await
            .with_context(|| format!("request to {path} failed"))?;
        Self::expect_ack(response, &path).await
    }

    async fn event_detail(&self, id: i64) -> Result<EventWithLogs> {
        let dto: EventWithLogsDto = self.get_json(&format!("/api/events/{id}")).await?;
        let details = dto
            .details
            .with_context(|| format!("event {id} not found"))?;
        Ok(EventWithLogs {
            details,
            logs: dto.logs,
        })
    }

    fn export_url(&self, id: i64) -> String {
        format!("{}/api/events/{id}/export", self.base_url)
    }

    async fn start_recording(&self, id: i64) -> Result<()> {
        self.post_ack("/api/recording/start", json!({ "event_id": id }))
            .await
    }

    async fn stop_recording(&self) -> Result<()> {
        self.post_ack("/api/recording/stop", json!({})).await
    }

    async fn close_active_event(&self) -> Result<()> {
        self.post_ack("/api/events/stop", json!({})).await
    }

    async fn recording_status(&self) -> Result<RecordingStatus> {
        self.get_json("/api/recording/status").await
    }
}
