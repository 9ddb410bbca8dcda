use std::sync::Arc;
use std::time::Instant;

use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::net::TcpStream;
use tokio_util::codec::{Framed, LinesCodec, LinesCodecError};

use crate::engine::{Engine, EngineError};
use crate::model::Reservation;
use crate::observability;
use crate::timeline;

/// Hard cap on one request line; anything longer tears down the connection.
const MAX_LINE_LEN: usize = 64 * 1024;

/// One JSON object per line.
#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    ListRooms,
    Create {
        room: String,
        user: String,
        start: String,
        end: String,
    },
    Cancel {
        id: String,
    },
    List {
        room: String,
        #[serde(default)]
        user: Option<String>,
    },
}

#[derive(Debug, Serialize)]
pub struct RoomDto {
    pub id: &'static str,
    pub name: &'static str,
}

/// Reservation as it crosses the wire — instants rendered as RFC 3339 UTC.
#[derive(Debug, Serialize)]
pub struct ReservationDto {
    pub id: String,
    pub room: &'static str,
    pub user: String,
    pub start: String,
    pub end: String,
}

impl From<&Reservation> for ReservationDto {
    fn from(r: &Reservation) -> Self {
        Self {
            id: r.id.to_string(),
            room: r.room.id(),
            user: r.user.clone(),
            start: timeline::to_rfc3339(r.span.start),
            end: timeline::to_rfc3339(r.span.end),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response {
    Rooms { rooms: Vec<RoomDto> },
    Created { reservation: ReservationDto },
    Cancelled { id: String },
    Reservations { reservations: Vec<ReservationDto> },
    Error { kind: &'static str, message: String },
}

/// Serve one client: read a JSON request per line, answer with a JSON
/// response per line. A line that fails to parse gets a `bad_request`
/// error and the connection stays open.
pub async fn process_connection(
    socket: TcpStream,
    engine: Arc<Engine>,
) -> Result<(), LinesCodecError> {
    let mut framed = Framed::new(socket, LinesCodec::new_with_max_length(MAX_LINE_LEN));

    while let Some(line) = framed.next().await {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => {
                let op = observability::op_label(&request);
                let started = Instant::now();
                let response = dispatch(&engine, request).await;
                let status = match response {
                    Response::Error { .. } => "error",
                    _ => "ok",
                };
                metrics::counter!(observability::REQUESTS_TOTAL, "op" => op, "status" => status)
                    .increment(1);
                metrics::histogram!(observability::REQUEST_DURATION_SECONDS, "op" => op)
                    .record(started.elapsed().as_secs_f64());
                response
            }
            Err(e) => {
                tracing::debug!("unparsable request line: {e}");
                Response::Error {
                    kind: "bad_request",
                    message: e.to_string(),
                }
            }
        };

        let payload = serde_json::to_string(&response).expect("response serializes");
        framed.send(payload).await?;
    }

    Ok(())
}

async fn dispatch(engine: &Engine, request: Request) -> Response {
    match request {
        Request::ListRooms => Response::Rooms {
            rooms: engine
                .list_rooms()
                .into_iter()
                .map(|r| RoomDto {
                    id: r.id,
                    name: r.name,
                })
                .collect(),
        },
        Request::Create {
            room,
            user,
            start,
            end,
        } => match engine.create_reservation(&room, &user, &start, &end).await {
            Ok(reservation) => {
                metrics::gauge!(observability::RESERVATIONS_ACTIVE).increment(1.0);
                Response::Created {
                    reservation: ReservationDto::from(&reservation),
                }
            }
            Err(e) => reject(e),
        },
        Request::Cancel { id } => match engine.cancel_reservation(&id).await {
            Ok(removed) => {
                metrics::gauge!(observability::RESERVATIONS_ACTIVE).decrement(1.0);
                Response::Cancelled {
                    id: removed.id.to_string(),
                }
            }
            Err(e) => reject(e),
        },
        Request::List { room, user } => {
            match engine.list_reservations(&room, user.as_deref()).await {
                Ok(reservations) => Response::Reservations {
                    reservations: reservations.iter().map(ReservationDto::from).collect(),
                },
                Err(e) => reject(e),
            }
        }
    }
}

fn reject(e: EngineError) -> Response {
    metrics::counter!(observability::REJECTIONS_TOTAL, "kind" => e.kind()).increment(1);
    Response::Error {
        kind: e.kind(),
        message: e.to_string(),
    }
}
