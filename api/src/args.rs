use std::time::Duration;

use clap::{Args as ClapArgs, Parser};
use terranova_core::domain::{
    common::{BackendConfig, GeolocationConfig, PlannerConfig, TerraNovaConfig},
    planner::entities::{BoundingBox, Climate, SoilType},
};
use url::Url;

#[derive(Debug, Clone, Parser)]
#[command(name = "terranova-api", version, about = "TerraNova backend-for-frontend")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub backend: BackendArgs,

    #[command(flatten)]
    pub planner: PlannerArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    /// Device sessions untouched for this long are dropped.
    #[arg(long = "session-idle-ttl-secs", env = "SESSION_IDLE_TTL_SECS", default_value_t = 1800)]
    pub session_idle_ttl_secs: u64,

    /// Upper bound on live device sessions; the least recently used goes first.
    #[arg(long = "max-sessions", env = "MAX_SESSIONS", default_value_t = 10_000)]
    pub max_sessions: usize,

    /// Prefix prepended to every route, e.g. `/api`.
    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct BackendArgs {
    #[arg(long = "backend-url", env = "BACKEND_URL", default_value = "http://localhost:8000")]
    pub url: Url,

    #[arg(long = "backend-diagnose-path", env = "BACKEND_DIAGNOSE_PATH", default_value = "/diagnose")]
    pub diagnose_path: String,

    #[arg(
        long = "backend-recommend-path",
        env = "BACKEND_RECOMMEND_PATH",
        default_value = "/api/planner/recommend_satellite"
    )]
    pub recommend_path: String,

    #[arg(long = "backend-health-path", env = "BACKEND_HEALTH_PATH", default_value = "/health")]
    pub health_path: String,

    /// Unset means no client-side timeout.
    #[arg(long = "backend-timeout-secs", env = "BACKEND_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct PlannerArgs {
    /// Demo farm box used when no live position is available: south,west,north,east.
    #[arg(
        long = "planner-default-bbox",
        env = "PLANNER_DEFAULT_BBOX",
        value_parser = parse_bbox,
        default_value = "11.0168,76.9558,11.0268,76.9658"
    )]
    pub default_bbox: BoundingBox,

    #[arg(long = "planner-default-soil-type", env = "PLANNER_DEFAULT_SOIL_TYPE", default_value_t = SoilType::RedLoam)]
    pub default_soil_type: SoilType,

    #[arg(long = "planner-temperature", env = "PLANNER_TEMPERATURE", default_value_t = 28.0)]
    pub temperature: f64,

    #[arg(long = "planner-humidity", env = "PLANNER_HUMIDITY", default_value_t = 65.0)]
    pub humidity: f64,

    #[arg(long = "planner-rainfall", env = "PLANNER_RAINFALL", default_value_t = 120.0)]
    pub rainfall: f64,

    #[arg(long = "planner-bbox-half-span", env = "PLANNER_BBOX_HALF_SPAN", default_value_t = 0.005)]
    pub bbox_half_span: f64,

    #[arg(long = "planner-max-recommendations", env = "PLANNER_MAX_RECOMMENDATIONS", default_value_t = 3)]
    pub max_recommendations: usize,

    #[arg(long = "geolocation-timeout-secs", env = "GEOLOCATION_TIMEOUT_SECS", default_value_t = 10)]
    pub geolocation_timeout_secs: u64,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

/// Parses `south,west,north,east` into a box with finite, ordered edges.
fn parse_bbox(value: &str) -> Result<BoundingBox, String> {
    let edges = value
        .split(',')
        .map(|edge| {
            edge.trim()
                .parse::<f64>()
                .map_err(|e| format!("invalid coordinate `{}`: {}", edge.trim(), e))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let [south, west, north, east] = edges[..] else {
        return Err(format!(
            "expected 4 comma-separated values (south,west,north,east), got {}",
            edges.len()
        ));
    };

    if !edges.iter().all(|edge| edge.is_finite()) {
        return Err("coordinates must be finite".to_string());
    }
    if south > north || west > east {
        return Err("south must not exceed north and west must not exceed east".to_string());
    }

    Ok(BoundingBox::new(south, west, north, east))
}

impl From<Args> for TerraNovaConfig {
    fn from(args: Args) -> Self {
        let planner = PlannerConfig {
            default_bbox: args.planner.default_bbox,
            default_soil_type: args.planner.default_soil_type,
            climate: Climate {
                temperature: args.planner.temperature,
                humidity: args.planner.humidity,
                rainfall: args.planner.rainfall,
            },
            bbox_half_span: args.planner.bbox_half_span,
            max_recommendations: args.planner.max_recommendations,
        };

        TerraNovaConfig {
            backend: BackendConfig {
                base_url: args.backend.url.to_string(),
                diagnose_path: args.backend.diagnose_path,
                recommend_path: args.backend.recommend_path,
                health_path: args.backend.health_path,
                request_timeout: args.backend.timeout_secs.map(Duration::from_secs),
            },
            planner,
            geolocation: GeolocationConfig {
                timeout: Duration::from_secs(args.planner.geolocation_timeout_secs),
                ..GeolocationConfig::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_core_config() {
        let args = Args::parse_from(["terranova-api"]);
        let config = TerraNovaConfig::from(args);
        let expected = TerraNovaConfig::default();

        assert_eq!(config.backend.endpoint("/diagnose"), "http://localhost:8000/diagnose");
        assert_eq!(config.planner.default_bbox, expected.planner.default_bbox);
        assert_eq!(config.planner.default_soil_type, SoilType::RedLoam);
        assert_eq!(config.planner.climate, expected.planner.climate);
        assert_eq!(config.geolocation, expected.geolocation);
        assert_eq!(config.backend.request_timeout, None);
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "terranova-api",
            "--backend-url",
            "http://10.0.0.5:8000/",
            "--backend-timeout-secs",
            "30",
            "--planner-default-soil-type",
            "black soil",
            "--planner-default-bbox",
            "1,2,3,4",
        ]);
        let config = TerraNovaConfig::from(args);

        assert_eq!(
            config.backend.endpoint("/health"),
            "http://10.0.0.5:8000/health"
        );
        assert_eq!(config.backend.request_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.planner.default_soil_type, SoilType::BlackSoil);
        assert_eq!(config.planner.default_bbox.as_array(), [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_rejects_default_bbox_with_wrong_arity() {
        for bbox in ["1,2,3", "1,2,3,4,5", ""] {
            let err = Args::try_parse_from(["terranova-api", "--planner-default-bbox", bbox])
                .unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        }
    }

    #[test]
    fn test_rejects_default_bbox_with_bad_edges() {
        for bbox in ["1,2,x,4", "3,2,1,4", "1,4,3,2", "1,2,inf,4"] {
            assert!(
                Args::try_parse_from(["terranova-api", "--planner-default-bbox", bbox]).is_err(),
                "{bbox} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_malformed_backend_url() {
        assert!(Args::try_parse_from(["terranova-api", "--backend-url", "not a url"]).is_err());
    }
}
