//! CLT Solver HTTP Server

use axum::{
    extract::Json,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use clt_solver::error::LaminateError;
use clt_solver::prelude::*;

const DEFAULT_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 8087);

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Debug, Deserialize)]
struct LaminateData {
    /// Named ply definitions, shared by every layer that references them
    plies: BTreeMap<String, PlyProperties>,
    /// Layers bottom to top
    layup: Vec<LayerData>,
}

#[derive(Debug, Deserialize)]
struct LayerData {
    angle: f64,
    ply: String,
}

#[derive(Debug, Deserialize)]
struct LaminateRequest {
    laminate: LaminateData,
}

#[derive(Debug, Deserialize)]
struct BucklingRequest {
    laminate: LaminateData,
    width: f64,
    length: f64,
    #[serde(default)]
    options: BucklingOptions,
    #[serde(default = "default_cross_check")]
    cross_check: bool,
}

fn default_cross_check() -> bool {
    true
}

#[derive(Debug, Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    results: Option<T>,
}

#[derive(Debug, Serialize)]
struct LaminateResults {
    total_thickness: f64,
    symmetric: bool,
    z: Vec<f64>,
    a: [[f64; 3]; 3],
    b: [[f64; 3]; 3],
    d: [[f64; 3]; 3],
    engineering_constants: EngineeringConstants,
}

#[derive(Debug, Serialize)]
struct BucklingResults {
    closed_form: BucklingResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    reference: Option<BucklingResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    relative_difference: Option<f64>,
}

fn rows(m: &Mat3) -> [[f64; 3]; 3] {
    [
        [m[(0, 0)], m[(0, 1)], m[(0, 2)]],
        [m[(1, 0)], m[(1, 1)], m[(1, 2)]],
        [m[(2, 0)], m[(2, 1)], m[(2, 2)]],
    ]
}

fn respond<T: Serialize>(outcome: Result<T, LaminateError>) -> impl IntoResponse {
    match outcome {
        Ok(results) => (
            StatusCode::OK,
            Json(ApiResponse {
                success: true,
                error: None,
                results: Some(results),
            }),
        ),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse {
                success: false,
                error: Some(e.to_string()),
                results: None,
            }),
        ),
    }
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn laminate(Json(request): Json<LaminateRequest>) -> impl IntoResponse {
    respond(run_laminate(request))
}

async fn buckling(Json(request): Json<BucklingRequest>) -> impl IntoResponse {
    respond(run_buckling(request))
}

fn build_laminate(data: LaminateData) -> Result<Laminate, LaminateError> {
    // Ordered by name so the first invalid ply reported is stable
    let mut plies = BTreeMap::new();
    for (name, props) in data.plies {
        plies.insert(name, Arc::new(Ply::from_properties(props)?));
    }

    let mut layup = Vec::with_capacity(data.layup.len());
    for (index, layer) in data.layup.into_iter().enumerate() {
        let ply = plies.get(&layer.ply).ok_or_else(|| {
            LaminateError::InvalidLayup(format!("entry {index}: unknown ply '{}'", layer.ply))
        })?;
        layup.push(LayupEntry::new(layer.angle, Arc::clone(ply)));
    }

    Laminate::new(layup)
}

fn run_laminate(request: LaminateRequest) -> Result<LaminateResults, LaminateError> {
    let laminate = build_laminate(request.laminate)?;

    Ok(LaminateResults {
        total_thickness: laminate.total_thickness(),
        symmetric: laminate.is_symmetric(),
        z: laminate.z_positions().to_vec(),
        a: rows(laminate.a()),
        b: rows(laminate.b()),
        d: rows(laminate.d()),
        engineering_constants: laminate.engineering_constants()?,
    })
}

fn run_buckling(request: BucklingRequest) -> Result<BucklingResults, LaminateError> {
    let laminate = build_laminate(request.laminate)?;
    let d = laminate.d();

    let closed_form = buckling_load_with(request.width, request.length, d, &request.options)?;

    let reference = if request.cross_check {
        let params = SearchParams::default().with_load_case(request.options.load_case);
        Some(critical_buckling_with(request.width, request.length, d, &params)?)
    } else {
        None
    };
    let relative_difference = reference.map(|r| closed_form.relative_difference(&r));

    Ok(BucklingResults {
        closed_form,
        reference,
        relative_difference,
    })
}

fn listen_addr() -> SocketAddr {
    std::env::var("CLT_SOLVER_ADDR")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(DEFAULT_ADDR))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/v1/laminate", post(laminate))
        .route("/api/v1/buckling", post(buckling))
        .layer(cors);

    let addr = listen_addr();
    println!("CLT Solver Server listening on http://{}", addr);
    println!("  Health check: GET  /health");
    println!("  Laminate:     POST /api/v1/laminate");
    println!("  Buckling:     POST /api/v1/buckling");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
