use crate::component::{
    AlphaRemover, ArchiveCompressor, AudioFilter, ComparisonCompositor, DuplicateReviewer,
    FolderCombinerComponent, ImageResizer, NativeResolution, QualityScorer, VectorConverter,
};
use crate::config::Config;
use crate::pause;
use anyhow::Result;
use console::{Term, style};
use log::error;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 執行單一工具：錯誤只印出，不中斷主選單
fn finish(term: &Term, shutdown_signal: &Arc<AtomicBool>, result: Result<()>) -> Result<()> {
    if let Err(e) = result {
        error!("工具執行失敗: {e:#}");
        eprintln!("{} {:#}", style(t!("common.error_prefix")).red().bold(), e);
    }

    // 回到選單後重置中斷旗標，下一個工具才能正常執行
    shutdown_signal.store(false, Ordering::SeqCst);
    pause(term)
}

pub fn run_image_resizer(term: &Term, shutdown_signal: &Arc<AtomicBool>) -> Result<()> {
    let config = Config::new()?;
    let resizer = ImageResizer::new(config, Arc::clone(shutdown_signal));
    finish(term, shutdown_signal, resizer.run())
}

pub fn run_alpha_remover(term: &Term, shutdown_signal: &Arc<AtomicBool>) -> Result<()> {
    let config = Config::new()?;
    let remover = AlphaRemover::new(config, Arc::clone(shutdown_signal));
    finish(term, shutdown_signal, remover.run())
}

pub fn run_folder_combiner(term: &Term, shutdown_signal: &Arc<AtomicBool>) -> Result<()> {
    let config = Config::new()?;
    let combiner = FolderCombinerComponent::new(config, Arc::clone(shutdown_signal));
    finish(term, shutdown_signal, combiner.run())
}

pub fn run_comparison_compositor(term: &Term, shutdown_signal: &Arc<AtomicBool>) -> Result<()> {
    let config = Config::new()?;
    let compositor = ComparisonCompositor::new(config, Arc::clone(shutdown_signal));
    finish(term, shutdown_signal, compositor.run())
}

pub fn run_duplicate_reviewer(term: &Term, shutdown_signal: &Arc<AtomicBool>) -> Result<()> {
    let config = Config::new()?;
    let reviewer = DuplicateReviewer::new(config, Arc::clone(shutdown_signal));
    finish(term, shutdown_signal, reviewer.run())
}

pub fn run_vector_converter(term: &Term, shutdown_signal: &Arc<AtomicBool>) -> Result<()> {
    let config = Config::new()?;
    let converter = VectorConverter::new(config, Arc::clone(shutdown_signal));
    finish(term, shutdown_signal, converter.run())
}

pub fn run_archive_compressor(term: &Term, shutdown_signal: &Arc<AtomicBool>) -> Result<()> {
    let config = Config::new()?;
    let compressor = ArchiveCompressor::new(config, Arc::clone(shutdown_signal));
    finish(term, shutdown_signal, compressor.run())
}

pub fn run_audio_filter(term: &Term, shutdown_signal: &Arc<AtomicBool>) -> Result<()> {
    let config = Config::new()?;
    let filter = AudioFilter::new(config, Arc::clone(shutdown_signal));
    finish(term, shutdown_signal, filter.run())
}

/// 品質評分有自己的子選單，離開時不需再暫停
pub fn run_quality_scorer(term: &Term) -> Result<()> {
    let config = Config::new()?;
    let scorer = QualityScorer::new(config);

    if let Err(e) = scorer.run() {
        eprintln!("{} {:#}", style(t!("common.error_prefix")).red().bold(), e);
        pause(term)?;
    }
    Ok(())
}

pub fn run_native_resolution(term: &Term) -> Result<()> {
    let config = Config::new()?;
    let native = NativeResolution::new(config);

    if let Err(e) = native.run() {
        eprintln!("{} {:#}", style(t!("common.error_prefix")).red().bold(), e);
        pause(term)?;
    }
    Ok(())
}
