//! 選單各項目的說明

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionInfo {
    pub title: &'static str,
    pub use_case: &'static str,
    pub description: &'static str,
    pub note: Option<&'static str>,
}

pub const OPTION_COUNT: usize = 16;

const OPTION_INFO: [OptionInfo; OPTION_COUNT] = [
    OptionInfo {
        title: "List available metrics",
        use_case: "When you want to see all the image quality metrics available in pyiqa.",
        description: "Provides a comprehensive list of all the metrics that can be used to evaluate image quality.",
        note: Some("Useful if you are unfamiliar with the available metrics and want to explore your options."),
    },
    OptionInfo {
        title: "Run a single metric on a single image",
        use_case: "When you want to evaluate the quality of a single image using one specific metric.",
        description: "Focuses on a particular aspect of image quality by selecting a specific metric.",
        note: Some("Ideal for quick assessments or when you have a specific quality concern in mind."),
    },
    OptionInfo {
        title: "Run multiple metrics on a single image",
        use_case: "When you want to evaluate a single image using multiple quality metrics at once.",
        description: "Applies several metrics simultaneously for a broader analysis of one image.",
        note: Some("Useful for comprehensive assessments or when comparing different quality aspects."),
    },
    OptionInfo {
        title: "Run a single metric on a directory",
        use_case: "When you want to evaluate every image in a directory using one specific metric.",
        description: "Applies a single metric to a batch of images in one run.",
        note: Some("Ideal for consistent quality checks across a dataset."),
    },
    OptionInfo {
        title: "Run multiple metrics on a directory",
        use_case: "When you want to evaluate every image in a directory using several metrics.",
        description: "Runs a thorough quality analysis of a batch of images, applying several metrics to each.",
        note: Some("Suited to detailed quality reports on large datasets."),
    },
    OptionInfo {
        title: "Compare two images using FR metrics",
        use_case: "When you want to compare a test image against a reference image using full-reference metrics.",
        description: "Measures how far a test image deviates from a high-quality reference.",
        note: Some("Common in image processing tasks where fidelity to the original matters."),
    },
    OptionInfo {
        title: "Compare two directories using FR metrics",
        use_case: "When you want to compare many test images against their corresponding reference images.",
        description: "Batch version of the two-image comparison; files are matched by name.",
        note: Some("Useful for quality assurance where consistency across a set of images is required."),
    },
    OptionInfo {
        title: "Compare upscaled image with original using NR metrics",
        use_case: "When you want to know whether upscaling improved quality without a high-quality reference.",
        description: "Scores the original and the upscaled image with no-reference metrics, one after the other.",
        note: Some("Suitable for judging the effectiveness of an upscaling algorithm."),
    },
    OptionInfo {
        title: "Batch compare upscaled images",
        use_case: "When you want to evaluate the improvement of many upscaled images at once.",
        description: "Scores every original/upscaled pair and writes the results to a CSV file.",
        note: Some("Ideal for large-scale image enhancement projects."),
    },
    OptionInfo {
        title: "Compare upscaling methods",
        use_case: "When you want to compare two upscaling methods on the same image.",
        description: "Scores the original and two upscaled versions side by side.",
        note: Some("Helps pick the best upscaling method for a specific application."),
    },
    OptionInfo {
        title: "Compare multiple upscaling models",
        use_case: "When you have several upscaled versions of one image produced by different models or settings.",
        description: "Scores the original and every file in a directory of upscaled results, writing a CSV table.",
        note: Some("Ideal for research and development of upscaling models."),
    },
    OptionInfo {
        title: "Run FID metric",
        use_case: "When you want to evaluate the quality and diversity of generated images compared to real images.",
        description: "Computes the Fréchet Inception Distance between a test directory and a reference directory or dataset.",
        note: Some("FID is a popular metric for assessing generative models."),
    },
    OptionInfo {
        title: "Generate quality map",
        use_case: "When you want to visualize the quality distribution across an image.",
        description: "Saves a per-region quality map to help locate problem areas.",
        note: Some("Useful for detailed analysis and visualization."),
    },
    OptionInfo {
        title: "Run metrics on video",
        use_case: "When you want to evaluate the quality of a video file.",
        description: "Extends image quality assessment to video and saves the output to a file.",
        note: Some("Ideal for video processing tasks where quality consistency is important."),
    },
    OptionInfo {
        title: "Save results to a file",
        use_case: "When you want to keep the assessment results for later analysis.",
        description: "Runs metrics on a directory and writes the full output to a file.",
        note: Some("Ideal for projects that track quality over time."),
    },
    OptionInfo {
        title: "Exit the program",
        use_case: "When you want to leave the quality toolbox and return to the main menu.",
        description: "Closes the toolbox cleanly.",
        note: None,
    },
];

/// 依選項編號（1 起算）取得說明
#[must_use]
pub fn option_info(option: usize) -> Option<&'static OptionInfo> {
    option.checked_sub(1).and_then(|index| OPTION_INFO.get(index))
}

impl OptionInfo {
    #[must_use]
    pub fn render(&self) -> String {
        let mut text = format!(
            "{}\n{}\nUse case: {}\nDescription: {}",
            self.title,
            "-".repeat(self.title.chars().count()),
            self.use_case,
            self.description
        );
        if let Some(note) = self.note {
            text.push_str(&format!("\nNote: {note}"));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_range() {
        assert!(option_info(0).is_none());
        assert!(option_info(17).is_none());
        assert_eq!(option_info(1).unwrap().title, "List available metrics");
        assert_eq!(option_info(16).unwrap().note, None);
    }

    #[test]
    fn test_render_underlines_title() {
        let text = option_info(12).unwrap().render();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Run FID metric"));
        assert_eq!(lines.next(), Some("--------------"));
        assert!(text.contains("Note: FID"));
    }
}
