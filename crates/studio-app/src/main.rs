mod app;
mod controller;
mod html_format;
mod html_render;

use app::StudioApp;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut options = eframe::NativeOptions::default();
    options.viewport = egui::ViewportBuilder::default()
        .with_inner_size([1320.0, 880.0])
        .with_min_inner_size([980.0, 640.0]);

    eframe::run_native(
        "Reply Studio",
        options,
        Box::new(|cc| {
            apply_brand_theme(&cc.egui_ctx);
            match StudioApp::initialize() {
                Ok(app) => Ok(Box::new(app) as Box<dyn eframe::App>),
                Err(err) => Err(err.into()),
            }
        }),
    )
    .map_err(|err| anyhow::anyhow!(err.to_string()))
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Gold-on-black corporate palette, matching the branded email template.
fn apply_brand_theme(ctx: &egui::Context) {
    let gold = egui::Color32::from_rgb(0xd4, 0xaf, 0x37);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(10.0, 8.0);
    style.spacing.button_padding = egui::vec2(12.0, 7.0);
    style.spacing.menu_margin = egui::Margin::same(8);
    style.spacing.window_margin = egui::Margin::same(14);

    let mut visuals = egui::Visuals::dark();
    visuals.window_fill = egui::Color32::from_rgb(0x16, 0x16, 0x16);
    visuals.panel_fill = egui::Color32::from_rgb(0x0d, 0x0d, 0x0d);
    visuals.extreme_bg_color = egui::Color32::from_rgb(0x08, 0x08, 0x08);

    visuals.widgets.noninteractive.bg_fill = egui::Color32::from_rgb(0x1a, 0x1a, 0x1a);
    visuals.widgets.noninteractive.bg_stroke =
        egui::Stroke::new(1.0, egui::Color32::from_rgb(0x2c, 0x2c, 0x2c));
    visuals.widgets.noninteractive.fg_stroke =
        egui::Stroke::new(1.0, egui::Color32::from_rgb(0xe8, 0xe8, 0xe8));

    visuals.widgets.inactive.bg_fill = egui::Color32::from_rgb(0x1e, 0x1e, 0x1e);
    visuals.widgets.inactive.bg_stroke =
        egui::Stroke::new(1.0, egui::Color32::from_rgb(0x30, 0x30, 0x30));
    visuals.widgets.inactive.fg_stroke =
        egui::Stroke::new(1.0, egui::Color32::from_rgb(0xbd, 0xbd, 0xbd));

    visuals.widgets.hovered.bg_fill = egui::Color32::from_rgb(0x28, 0x24, 0x16);
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, gold);
    visuals.widgets.hovered.fg_stroke =
        egui::Stroke::new(1.0, egui::Color32::from_rgb(0xf0, 0xe6, 0xc8));

    visuals.widgets.active.bg_fill = gold;
    visuals.widgets.active.bg_stroke = egui::Stroke::new(1.0, gold);
    visuals.widgets.active.fg_stroke =
        egui::Stroke::new(1.0, egui::Color32::from_rgb(0x11, 0x11, 0x11));

    visuals.selection.bg_fill = gold.gamma_multiply(0.55);
    visuals.selection.stroke = egui::Stroke::new(1.0, gold);

    visuals.hyperlink_color = gold;
    visuals.window_corner_radius = egui::CornerRadius::same(10);

    style.visuals = visuals;
    ctx.set_style(style);
}
