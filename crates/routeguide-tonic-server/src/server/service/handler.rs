//! gRPC service implementation for the route guide.
//!
//! This module defines [`RouteGuideService`], the concrete implementation of
//! the [`RouteGuide`] gRPC service defined in the protobuf specification. It
//! covers all four interaction patterns against the in-memory
//! [`FeatureStore`]:
//!
//! - `GetFeature` (unary/unary) - point lookup.
//! - `ListFeatures` (unary/streaming) - bounding-box filtering.
//! - `RecordRoute` (streaming/unary) - route-statistics aggregation.
//! - `RouteChat` (streaming/streaming) - stateful note relay.
//!
//! Handlers are stateless across calls; the only per-call state is
//! `RouteChat`'s note list, which lives on that call's task and is dropped
//! when the call ends.

use crate::server::{config::ServerConfig, store::FeatureStore};
use core::pin::Pin;
use futures::{Stream, TryStreamExt};
use routeguide_tonic_core::geo::{self, RectBounds};
use routeguide_tonic_core::proto::{
    Feature, Point, Rectangle, RouteNote, RouteSummary, route_guide_server::RouteGuide,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Request, Response, Status, Streaming};

/// gRPC service for location-feature lookup and route tracking.
///
/// Holds the feature database behind an `Arc`: the store is read-only after
/// startup, so every concurrent call shares it without locking. Cloning the
/// service (tonic does this per connection) clones the handle, not the data.
#[derive(Clone)]
pub struct RouteGuideService {
    store: Arc<FeatureStore>,
    config: ServerConfig,
}

impl RouteGuideService {
    /// Creates the service over a loaded feature store.
    pub fn new(store: FeatureStore, config: ServerConfig) -> Self {
        Self {
            store: Arc::new(store),
            config,
        }
    }
}

#[tonic::async_trait]
impl RouteGuide for RouteGuideService {
    type ListFeaturesStream = Pin<Box<dyn Stream<Item = Result<Feature, Status>> + Send>>;
    type RouteChatStream = Pin<Box<dyn Stream<Item = Result<RouteNote, Status>> + Send>>;

    /// Returns the feature at the given point.
    ///
    /// A miss is a normal result, not an error: the response is a feature
    /// with an empty name and the *requested* point as its location.
    #[tracing::instrument(skip_all, fields(
        latitude = req.get_ref().latitude,
        longitude = req.get_ref().longitude,
    ))]
    async fn get_feature(&self, req: Request<Point>) -> Result<Response<Feature>, Status> {
        let point = req.into_inner();
        Ok(Response::new(feature_at(&self.store, point)))
    }

    /// Streams every feature inside the requested rectangle.
    ///
    /// The rectangle's corners may arrive in either order; bounds are
    /// normalized and inclusive. Matches are emitted lazily in store order
    /// through a bounded channel, so a slow client applies backpressure and
    /// a disconnected client stops the scan early.
    #[tracing::instrument(skip_all)]
    async fn list_features(
        &self,
        req: Request<Rectangle>,
    ) -> Result<Response<Self::ListFeaturesStream>, Status> {
        let rect = req.into_inner();
        let bounds = RectBounds::try_from(&rect).map_err(Status::from)?;

        let store = Arc::clone(&self.store);
        let (tx, rx) = mpsc::channel(self.config.stream_buffer_size);

        tokio::spawn(async move {
            stream_features(&store, bounds, &tx).await;
        });

        Ok(Response::new(Box::pin(ReceiverStream::new(rx))))
    }

    /// Consumes a stream of points and answers with one route summary.
    ///
    /// The summary is only produced once the input stream closes; early
    /// cancellation surfaces the input error and emits nothing.
    #[tracing::instrument(skip_all)]
    async fn record_route(
        &self,
        req: Request<Streaming<Point>>,
    ) -> Result<Response<RouteSummary>, Status> {
        let summary = summarize_route(&self.store, req.into_inner()).await?;
        Ok(Response::new(summary))
    }

    /// Relays previously received notes to later visitors of the same point.
    ///
    /// The note list is owned by this call's task and is never shared with
    /// other calls; it is dropped when either direction of the stream closes.
    #[tracing::instrument(skip_all)]
    async fn route_chat(
        &self,
        req: Request<Streaming<RouteNote>>,
    ) -> Result<Response<Self::RouteChatStream>, Status> {
        let input = req.into_inner();
        let (tx, rx) = mpsc::channel(self.config.stream_buffer_size);

        tokio::spawn(async move {
            if let Err(status) = relay_notes(input, &tx).await {
                // Input stream failed; surface the error unless the client is
                // already gone.
                if tx.send(Err(status)).await.is_err() {
                    tracing::debug!("RouteChat client disconnected before error delivery");
                }
            }
        });

        Ok(Response::new(Box::pin(ReceiverStream::new(rx))))
    }
}

/// Looks up `point` in the store, falling back to an unnamed feature at the
/// requested point on a miss.
fn feature_at(store: &FeatureStore, point: Point) -> Feature {
    match store.lookup(&point) {
        Some(feature) => feature.clone(),
        None => Feature {
            name: String::new(),
            location: Some(point),
        },
    }
}

/// Producer half of `ListFeatures`: scans the store in order and forwards
/// every in-box feature through `tx`.
///
/// Returns when the scan completes or the client stops accepting items,
/// whichever comes first; nothing is emitted after a failed send.
async fn stream_features(
    store: &FeatureStore,
    bounds: RectBounds,
    tx: &mpsc::Sender<Result<Feature, Status>>,
) {
    for feature in store.features() {
        let inside = feature
            .location
            .as_ref()
            .is_some_and(|location| bounds.contains(location));
        if !inside {
            continue;
        }
        if tx.send(Ok(feature.clone())).await.is_err() {
            tracing::debug!("ListFeatures client disconnected mid-stream");
            return;
        }
    }
}

/// Drains a point stream and accumulates the route summary.
///
/// Points are processed strictly in arrival order. The running distance sums
/// the great-circle distance of every consecutive pair (the first point
/// contributes none); `distance` and `elapsed_time` are truncated toward
/// zero at the end, matching the wire's integer fields.
async fn summarize_route<S>(store: &FeatureStore, mut input: S) -> Result<RouteSummary, Status>
where
    S: Stream<Item = Result<Point, Status>> + Unpin,
{
    let started = Instant::now();
    let mut point_count: i32 = 0;
    let mut feature_count: i32 = 0;
    let mut distance: f64 = 0.0;
    let mut previous: Option<Point> = None;

    while let Some(point) = input.try_next().await? {
        point_count += 1;
        if store.lookup(&point).is_some() {
            feature_count += 1;
        }
        if let Some(prev) = &previous {
            distance += geo::distance_meters(prev, &point);
        }
        previous = Some(point);
    }

    Ok(RouteSummary {
        point_count,
        feature_count,
        distance: distance as i32,
        elapsed_time: started.elapsed().as_secs() as i32,
    })
}

/// Core of `RouteChat`: replays stored notes to co-located newcomers.
///
/// For each incoming note, every previously stored note at a point-equal
/// location is emitted in its original arrival order *before* the new note
/// is appended to the list. A note is never echoed back immediately, only on
/// a future arrival at the same point.
///
/// Returns `Ok(())` when the input closes or the client stops accepting
/// output, and the input stream's error otherwise.
async fn relay_notes<S>(
    mut input: S,
    tx: &mpsc::Sender<Result<RouteNote, Status>>,
) -> Result<(), Status>
where
    S: Stream<Item = Result<RouteNote, Status>> + Unpin,
{
    let mut notes: Vec<RouteNote> = Vec::new();

    while let Some(note) = input.try_next().await? {
        for prev in notes.iter().filter(|prev| notes_colocated(prev, &note)) {
            if tx.send(Ok(prev.clone())).await.is_err() {
                // Client went away; drop the per-call state and stop.
                return Ok(());
            }
        }
        notes.push(note);
    }

    Ok(())
}

/// Point equality over note locations. Notes with absent locations (legal in
/// proto3) only match each other.
fn notes_colocated(a: &RouteNote, b: &RouteNote) -> bool {
    match (a.location.as_ref(), b.location.as_ref()) {
        (Some(a), Some(b)) => geo::points_equal(a, b),
        (None, None) => true,
        _ => false,
    }
}
