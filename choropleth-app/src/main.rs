use anyhow::Context;
use choropleth::{
    constants::CENTER_REFERENCE,
    prelude::*,
};
use serde_json::json;

/// Replays a short session against a headless host: attach, zoom, pan,
/// stream values and let the fill animations run out.
fn main() -> anyhow::Result<()> {
    choropleth::init_logging();

    let registry = Arc::new(demo_registry()?);
    let mut host = HeadlessHost::new(CENTER_REFERENCE, 4.0, SurfaceSize::new(1200.0, 800.0));

    let mut overlay: ChoroplethOverlay<MemoryContainer> = ChoroplethOverlay::from_overrides(
        registry,
        &json!({ "speed": 400, "strokeWidth": 0.5 }),
    )?;
    overlay
        .on_add(&mut host)
        .context("attaching overlay to host")?;
    overlay.draw(&host)?;
    report(&overlay)?;

    for zoom in [5.0, 6.0, 7.0] {
        host.set_zoom(zoom);
        overlay.on_viewport_changed(&host)?;
        report(&overlay)?;
    }

    host.pan(Point::new(-150.0, 40.0));
    overlay.on_viewport_changed(&host)?;
    report(&overlay)?;

    overlay.set_values([("TX", 0.41), ("CA", 0.87), ("NY", 0.12), ("ZZ", 0.5)])?;

    let map = overlay.map_mut()?;
    let mut frames = 0;
    while map.surface().is_animating() {
        std::thread::sleep(Duration::from_millis(16));
        map.surface_mut().tick_now();
        frames += 1;
    }
    log::info!("fill animations settled after {frames} frames");

    let mut keys = map.shape_keys();
    keys.sort_unstable();
    for key in keys {
        if let Some(shape) = map.shape(key) {
            println!("{key}: value={} color={}", shape.value(), shape.color());
        }
    }

    OverlayLifecycle::<HeadlessHost>::on_remove(&mut overlay)?;
    Ok(())
}

fn report(overlay: &ChoroplethOverlay<MemoryContainer>) -> anyhow::Result<()> {
    let draw = overlay
        .last_draw()
        .context("overlay has not been drawn yet")?;
    println!(
        "zoom {:>4}: scale {:>7} container at ({:.1}, {:.1})",
        draw.zoom, draw.scale, draw.top_left.x, draw.top_left.y
    );
    Ok(())
}

fn demo_registry() -> anyhow::Result<ProjectionRegistry> {
    let mercator = ProjectionDefinition::from_value(
        "SphericalMercator",
        &json!({
            "bounds": [1000, 700],
            "TX": "M420,430L520,430L520,530L470,560Z",
            "CA": "M90,250L140,250L150,330L100,360Z",
            "NY": "M820,160L860,160L860,200L830,205Z"
        }),
    )?;
    let conical = ProjectionDefinition::from_value(
        "Conical",
        &json!({
            "bounds": [960, 600],
            "TX": "M400,400L500,400L500,500Z",
            "CA": "M100,200L150,200L150,300Z",
            "NY": "M800,100L850,100L850,150Z"
        }),
    )?;

    Ok(ProjectionRegistry::builder()
        .register(mercator)?
        .register(conical)?
        .build())
}
