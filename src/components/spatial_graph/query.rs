//! Requests against the graph-data service and last-request-wins bookkeeping.
//!
//! Each of the three queries runs on its own channel. A channel hands out a
//! ticket per request and only accepts the response carrying the newest
//! ticket, so a superseded or abandoned request can never overwrite state.

use gloo_net::http::{Request, Response};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::types::{ClusterMembers, NodeDrilldown, SpatialGraphResponse, ViewportQuery};

/// Errors produced by any of the three service queries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
	/// The request never produced a response (offline, CORS, aborted).
	#[error("request failed: {0}")]
	Transport(String),

	/// The service answered with a non-success status.
	#[error("service returned HTTP {status}: {body}")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Trimmed response body, possibly empty.
		body: String,
	},

	/// The request body could not be serialized.
	#[error("could not encode request: {0}")]
	Encode(String),

	/// The response body was not the expected JSON shape.
	#[error("malformed response: {0}")]
	Decode(String),
}

/// HTTP client for the graph-data service.
#[derive(Clone, Debug)]
pub struct HttpGraphService {
	base_url: String,
}

impl HttpGraphService {
	pub fn new(base_url: impl Into<String>) -> Self {
		let base_url = base_url.into().trim_end_matches('/').to_string();
		Self { base_url }
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// Fetch the slice of the graph visible through `query`.
	pub async fn viewport(&self, query: &ViewportQuery) -> Result<SpatialGraphResponse, QueryError> {
		let url = format!("{}/spatial/viewport", self.base_url);
		debug!(
			"viewport query: zoom={:.3} center=({:.1}, {:.1}) size={}x{}",
			query.zoom_factor,
			query.center_x,
			query.center_y,
			query.viewport_width,
			query.viewport_height
		);
		let request = Request::post(&url)
			.json(query)
			.map_err(|e| QueryError::Encode(e.to_string()))?;
		let resp = request
			.send()
			.await
			.map_err(|e| QueryError::Transport(e.to_string()))?;
		read_json(resp).await
	}

	/// Fetch a node's immediate neighborhood.
	pub async fn node_drilldown(&self, node_id: &str) -> Result<NodeDrilldown, QueryError> {
		let url = format!(
			"{}/spatial/nodes/{}/drilldown",
			self.base_url,
			encode_segment(node_id)
		);
		get_json(&url).await
	}

	/// Fetch the membership list of a cluster.
	pub async fn cluster_members(&self, cluster_id: &str) -> Result<ClusterMembers, QueryError> {
		let url = format!(
			"{}/spatial/clusters/{}/members",
			self.base_url,
			encode_segment(cluster_id)
		);
		get_json(&url).await
	}
}

fn encode_segment(segment: &str) -> String {
	js_sys::encode_uri_component(segment).into()
}

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, QueryError> {
	let resp = Request::get(url)
		.send()
		.await
		.map_err(|e| QueryError::Transport(e.to_string()))?;
	read_json(resp).await
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, QueryError> {
	if !resp.ok() {
		let status = resp.status();
		let body = resp.text().await.unwrap_or_default();
		return Err(QueryError::Status {
			status,
			body: body.trim().to_string(),
		});
	}
	let text = resp
		.text()
		.await
		.map_err(|e| QueryError::Transport(e.to_string()))?;
	serde_json::from_str(&text).map_err(|e| QueryError::Decode(e.to_string()))
}

/// Identifies one issued request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
	pub fn id(self) -> u64 {
		self.0
	}
}

/// Hands out tickets and remembers which one is still wanted.
///
/// `C` is whatever the caller needs back when the wanted response arrives.
#[derive(Clone, Debug)]
pub struct RequestSequence<C = ()> {
	issued: u64,
	current: Option<(u64, C)>,
}

impl<C> Default for RequestSequence<C> {
	fn default() -> Self {
		Self {
			issued: 0,
			current: None,
		}
	}
}

impl<C> RequestSequence<C> {
	/// Issue a new ticket, superseding any outstanding one.
	pub fn issue(&mut self, context: C) -> RequestTicket {
		self.issued += 1;
		self.current = Some((self.issued, context));
		RequestTicket(self.issued)
	}

	/// Claim the context of `ticket` if it is still the wanted request.
	pub fn accept(&mut self, ticket: RequestTicket) -> Option<C> {
		match self.current.take() {
			Some((id, context)) if id == ticket.0 => Some(context),
			other => {
				self.current = other;
				None
			}
		}
	}

	/// Drop interest in the outstanding request.
	pub fn cancel(&mut self) {
		self.current = None;
	}

	pub fn is_pending(&self) -> bool {
		self.current.is_some()
	}
}

/// What was issued alongside a viewport ticket.
#[derive(Clone, Debug, PartialEq)]
pub struct IssuedQuery {
	pub query: ViewportQuery,
	/// Pan origin at issue time.
	pub pan: (f64, f64),
}

/// Outcome of resolving a viewport ticket.
#[derive(Debug)]
pub enum FeedUpdate {
	/// Newest response; the caller replaces its snapshot with it.
	Applied {
		ticket: RequestTicket,
		issued: IssuedQuery,
		response: SpatialGraphResponse,
	},
	/// Newest request failed; the previous snapshot stays.
	Failed,
	/// A superseded request resolved and was discarded.
	Stale,
}

/// Bookkeeping for the main viewport query.
#[derive(Debug, Default)]
pub struct ViewportFeed {
	sequence: RequestSequence<IssuedQuery>,
	error: Option<String>,
}

impl ViewportFeed {
	pub fn begin(&mut self, issued: IssuedQuery) -> RequestTicket {
		self.sequence.issue(issued)
	}

	pub fn resolve(
		&mut self,
		ticket: RequestTicket,
		result: Result<SpatialGraphResponse, QueryError>,
	) -> FeedUpdate {
		let Some(issued) = self.sequence.accept(ticket) else {
			debug!("discarding stale viewport response #{}", ticket.id());
			return FeedUpdate::Stale;
		};
		match result {
			Ok(response) => {
				self.error = None;
				FeedUpdate::Applied {
					ticket,
					issued,
					response,
				}
			}
			Err(e) => {
				warn!("viewport query #{} failed: {}", ticket.id(), e);
				self.error = Some(e.to_string());
				FeedUpdate::Failed
			}
		}
	}

	pub fn is_loading(&self) -> bool {
		self.sequence.is_pending()
	}

	pub fn error(&self) -> Option<&str> {
		self.error.as_deref()
	}
}

/// Display state of a side panel.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum PanelState<T> {
	#[default]
	Closed,
	/// Waiting on the query for the named target.
	Loading(String),
	Ready(T),
	Failed(String),
}

impl<T> PanelState<T> {
	pub fn is_open(&self) -> bool {
		!matches!(self, PanelState::Closed)
	}
}

/// A side-channel query feeding one panel.
#[derive(Debug)]
pub struct PanelChannel<T> {
	sequence: RequestSequence<String>,
	state: PanelState<T>,
}

impl<T> Default for PanelChannel<T> {
	fn default() -> Self {
		Self {
			sequence: RequestSequence::default(),
			state: PanelState::Closed,
		}
	}
}

impl<T> PanelChannel<T> {
	/// Open (or retarget) the panel, superseding any outstanding request.
	pub fn open(&mut self, target: &str) -> RequestTicket {
		self.state = PanelState::Loading(target.to_string());
		self.sequence.issue(target.to_string())
	}

	/// Returns whether the result was taken.
	pub fn resolve(&mut self, ticket: RequestTicket, result: Result<T, QueryError>) -> bool {
		let Some(target) = self.sequence.accept(ticket) else {
			return false;
		};
		self.state = match result {
			Ok(value) => PanelState::Ready(value),
			Err(e) => {
				warn!("panel query for {} failed: {}", target, e);
				PanelState::Failed(e.to_string())
			}
		};
		true
	}

	/// Close the panel; a late response is discarded.
	pub fn close(&mut self) {
		self.sequence.cancel();
		self.state = PanelState::Closed;
	}

	pub fn state(&self) -> &PanelState<T> {
		&self.state
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::spatial_graph::physics::tests::node;

	fn issued(zoom: f64) -> IssuedQuery {
		IssuedQuery {
			query: ViewportQuery {
				zoom_factor: zoom,
				center_x: 0.0,
				center_y: 0.0,
				viewport_width: 800.0,
				viewport_height: 600.0,
				focus_node_id: None,
				type_filter: None,
			},
			pan: (0.0, 0.0),
		}
	}

	fn response(total: usize) -> SpatialGraphResponse {
		SpatialGraphResponse {
			total_nodes_in_graph: total,
			..Default::default()
		}
	}

	#[test]
	fn sequence_accepts_only_newest() {
		let mut seq = RequestSequence::default();
		let first = seq.issue("a");
		let second = seq.issue("b");
		assert!(second > first);
		assert_eq!(seq.accept(first), None);
		assert!(seq.is_pending());
		assert_eq!(seq.accept(second), Some("b"));
		assert!(!seq.is_pending());
		assert_eq!(seq.accept(second), None);
	}

	#[test]
	fn late_older_response_is_stale() {
		let mut feed = ViewportFeed::default();
		let old = feed.begin(issued(1.0));
		let new = feed.begin(issued(1.5));

		match feed.resolve(new, Ok(response(2))) {
			FeedUpdate::Applied { issued, response, .. } => {
				assert_eq!(issued.query.zoom_factor, 1.5);
				assert_eq!(response.total_nodes_in_graph, 2);
			}
			other => panic!("expected applied, got {other:?}"),
		}
		assert!(matches!(feed.resolve(old, Ok(response(1))), FeedUpdate::Stale));
		assert!(!feed.is_loading());
	}

	#[test]
	fn failure_sets_error_and_success_clears_it() {
		let mut feed = ViewportFeed::default();
		let t = feed.begin(issued(1.0));
		let update = feed.resolve(t, Err(QueryError::Transport("offline".into())));
		assert!(matches!(update, FeedUpdate::Failed));
		assert_eq!(feed.error(), Some("request failed: offline"));

		let t = feed.begin(issued(1.0));
		assert!(feed.is_loading());
		assert!(matches!(feed.resolve(t, Ok(response(0))), FeedUpdate::Applied { .. }));
		assert_eq!(feed.error(), None);
	}

	#[test]
	fn stale_failure_does_not_set_error() {
		let mut feed = ViewportFeed::default();
		let old = feed.begin(issued(1.0));
		let _new = feed.begin(issued(2.0));
		assert!(matches!(
			feed.resolve(old, Err(QueryError::Decode("bad".into()))),
			FeedUpdate::Stale
		));
		assert_eq!(feed.error(), None);
	}

	#[test]
	fn closed_panel_discards_result() {
		let mut panel: PanelChannel<ClusterMembers> = PanelChannel::default();
		let t = panel.open("c1");
		assert_eq!(panel.state(), &PanelState::Loading("c1".into()));
		panel.close();
		assert!(!panel.resolve(t, Ok(ClusterMembers::default())));
		assert_eq!(panel.state(), &PanelState::Closed);
	}

	#[test]
	fn retargeted_panel_keeps_newest() {
		let mut panel: PanelChannel<NodeDrilldown> = PanelChannel::default();
		let first = panel.open("a");
		let second = panel.open("b");

		let drill = |id: &str| NodeDrilldown {
			center_node: node(id),
			nodes: vec![],
			outgoing_count: 0,
			incoming_count: 0,
		};
		assert!(panel.resolve(second, Ok(drill("b"))));
		assert!(!panel.resolve(first, Ok(drill("a"))));
		match panel.state() {
			PanelState::Ready(d) => assert_eq!(d.center_node.id, "b"),
			other => panic!("unexpected {other:?}"),
		}
	}

	#[test]
	fn panel_failure_is_scoped() {
		let mut panel: PanelChannel<ClusterMembers> = PanelChannel::default();
		let t = panel.open("c9");
		assert!(panel.resolve(
			t,
			Err(QueryError::Status {
				status: 500,
				body: "boom".into()
			})
		));
		assert_eq!(
			panel.state(),
			&PanelState::Failed("service returned HTTP 500: boom".into())
		);
	}

	#[test]
	fn base_url_is_normalized() {
		assert_eq!(HttpGraphService::new("https://api.example/v1/").base_url(), "https://api.example/v1");
	}
}
