use crate::config::types::Config;
use crate::menu::handlers::{
    run_alpha_remover, run_archive_compressor, run_audio_filter, run_comparison_compositor,
    run_duplicate_reviewer, run_folder_combiner, run_image_resizer, run_native_resolution,
    run_quality_scorer, run_vector_converter,
};
use crate::menu::settings_menu::show_settings_menu;
use anyhow::Result;
use console::{Term, style};
use dialoguer::Select;
use dialoguer::theme::ColorfulTheme;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

pub fn show_main_menu(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<bool> {
    term.clear_screen()?;

    println!("{}", style(t!("main_menu.title")).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());

    let options = vec![
        t!("main_menu.opt_resize"),
        t!("main_menu.opt_alpha"),
        t!("main_menu.opt_combine"),
        t!("main_menu.opt_composite"),
        t!("main_menu.opt_dedup"),
        t!("main_menu.opt_vector"),
        t!("main_menu.opt_archive"),
        t!("main_menu.opt_audio"),
        t!("main_menu.opt_quality"),
        t!("main_menu.opt_native"),
        t!("main_menu.opt_settings"),
        t!("main_menu.exit"),
    ];

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("main_menu.prompt"))
        .items(&options)
        .default(0)
        .interact_on_opt(term)?;

    match selection {
        Some(0) => run_image_resizer(term, shutdown_signal)?,
        Some(1) => run_alpha_remover(term, shutdown_signal)?,
        Some(2) => run_folder_combiner(term, shutdown_signal)?,
        Some(3) => run_comparison_compositor(term, shutdown_signal)?,
        Some(4) => run_duplicate_reviewer(term, shutdown_signal)?,
        Some(5) => run_vector_converter(term, shutdown_signal)?,
        Some(6) => run_archive_compressor(term, shutdown_signal)?,
        Some(7) => run_audio_filter(term, shutdown_signal)?,
        Some(8) => run_quality_scorer(term)?,
        Some(9) => run_native_resolution(term)?,
        Some(10) => show_settings_menu(term, config)?,
        Some(11) | None => return Ok(false), // ESC 直接離開
        _ => unreachable!(),
    }

    Ok(true)
}
