use chart_polyline::api::{ChartHost, ChartHostConfig};
use chart_polyline::core::{LogicalPoint, Viewport, ViewPoint};
use chart_polyline::extensions::{
    ChartApi, PaneView, PolylineOptions, PolylineOptionsPatch, PolylineState, PolylineTool,
    SeriesApi, SeriesPrimitive,
};
use chart_polyline::render::DrawCommand;
use chart_polyline::telemetry;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

const USAGE: &str = "usage: polyline_trace_tool replay --input <path> --output <path> [--trace]";

#[derive(Debug)]
struct CliArgs {
    input: PathBuf,
    output: PathBuf,
    trace: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScenarioFile {
    trace_name: String,
    host: ChartHostConfig,
    #[serde(default)]
    options: PolylineOptions,
    steps: Vec<ScenarioStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum ScenarioStep {
    Attach,
    Detach,
    Activate,
    Deactivate,
    Click { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Leave,
    Clear,
    ApplyOptions { patch: PolylineOptionsPatch },
    Pan { delta_px: f64 },
    Zoom { factor: f64, anchor_x: f64 },
    Resize { width: u32, height: u32 },
    Paint,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TraceFile {
    trace_name: String,
    frames: Vec<TraceFrame>,
    final_state: PolylineState,
    repaint_requests: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TraceFrame {
    step_index: usize,
    points: Vec<LogicalPoint>,
    temp_point: Option<LogicalPoint>,
    view_points: Vec<ViewPoint>,
    segment_count: usize,
    marker_count: usize,
    commands: Vec<DrawCommand>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    if args.trace {
        let _ = telemetry::init_tracing_with_filter(telemetry::INTERACTION_TRACE_FILTER);
    }

    let raw = fs::read_to_string(&args.input)
        .map_err(|err| format!("failed to read `{}`: {err}", args.input.display()))?;
    let scenario: ScenarioFile =
        serde_json::from_str(&raw).map_err(|err| format!("invalid json: {err}"))?;
    let trace = replay(scenario)?;
    write_json(&args.output, &trace)
}

fn replay(scenario: ScenarioFile) -> Result<TraceFile, String> {
    scenario
        .options
        .validate()
        .map_err(|err| format!("invalid options: {err}"))?;
    let host = ChartHost::new(scenario.host).map_err(|err| format!("invalid host: {err}"))?;
    let mut tool = PolylineTool::new(scenario.options);
    tool.attached(host.attached_params());

    let mut frames = Vec::new();
    for (step_index, step) in scenario.steps.into_iter().enumerate() {
        let fail = |err: chart_polyline::ChartError| format!("step {step_index}: {err}");
        match step {
            ScenarioStep::Attach => tool.attached(host.attached_params()),
            ScenarioStep::Detach => tool.detached(),
            ScenarioStep::Activate => {
                let chart: Rc<dyn ChartApi> = host.clone();
                let series: Rc<dyn SeriesApi> = host.clone();
                tool.activate(chart, series);
            }
            ScenarioStep::Deactivate => tool.deactivate(),
            ScenarioStep::Click { x, y } => {
                host.pointer_click(x, y);
            }
            ScenarioStep::Move { x, y } => {
                host.pointer_move(x, y);
            }
            ScenarioStep::Leave => host.pointer_leave(),
            ScenarioStep::Clear => tool.clear_points(),
            ScenarioStep::ApplyOptions { patch } => tool.apply_options(patch),
            ScenarioStep::Pan { delta_px } => {
                host.pan_by_pixels(delta_px).map_err(fail)?;
                tool.update_all_views();
            }
            ScenarioStep::Zoom { factor, anchor_x } => {
                host.zoom_by_factor(factor, anchor_x).map_err(fail)?;
                tool.update_all_views();
            }
            ScenarioStep::Resize { width, height } => {
                host.resize(Viewport::new(width, height)).map_err(fail)?;
                tool.update_all_views();
            }
            ScenarioStep::Paint => {
                let surface = host.paint_recording(&tool).map_err(fail)?;
                let view_points = tool
                    .pane_views()
                    .first()
                    .map(|view| view.renderer().points().to_vec())
                    .unwrap_or_default();
                frames.push(TraceFrame {
                    step_index,
                    points: tool.points(),
                    temp_point: tool.temp_point(),
                    view_points,
                    segment_count: surface.segment_count(),
                    marker_count: surface.marker_centers().len(),
                    commands: surface.into_commands(),
                });
            }
        }
    }

    Ok(TraceFile {
        trace_name: scenario.trace_name,
        frames,
        final_state: tool.snapshot(),
        repaint_requests: host.repaint_requests(),
    })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|err| format!("failed to serialize output: {err}"))?;
    fs::write(path, format!("{json}\n"))
        .map_err(|err| format!("failed to write `{}`: {err}", path.display()))
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("replay") => {}
        _ => return Err(USAGE.to_owned()),
    }

    let mut input = None::<PathBuf>;
    let mut output = None::<PathBuf>;
    let mut trace = false;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--input" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --input".to_owned())?;
                input = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output = Some(PathBuf::from(value));
            }
            "--trace" => trace = true,
            "--help" | "-h" => return Err(USAGE.to_owned()),
            other => return Err(format!("unknown argument `{other}`\n{USAGE}")),
        }
    }

    Ok(CliArgs {
        input: input.ok_or_else(|| "missing --input".to_owned())?,
        output: output.ok_or_else(|| "missing --output".to_owned())?,
        trace,
    })
}
