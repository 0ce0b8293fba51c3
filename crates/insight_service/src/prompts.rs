use domain::VideoSummary;

/// How many of the most recent titles go into the strategy prompt
pub const SUMMARY_TITLE_COUNT: usize = 5;

pub fn channel_summary(videos: &[VideoSummary]) -> String {
    let top_titles = videos
        .iter()
        .take(SUMMARY_TITLE_COUNT)
        .map(|v| v.title.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Based on the following top video titles, summarize the content strategy \
         and provide 3 growth suggestions:\n\n{top_titles}\n"
    )
}

pub fn title_suggestions(title: &str, description: &str) -> String {
    format!(
        "Improve this YouTube video title for higher engagement. \
         Also suggest 2 alternate options.\n\nTitle: {title}\nDescription: {description}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(title: &str) -> VideoSummary {
        VideoSummary {
            video_id: format!("id-{title}"),
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn summary_embeds_first_five_titles_in_order() {
        let videos: Vec<_> = (1..=7).map(|i| video(&format!("Title {i}"))).collect();

        let prompt = channel_summary(&videos);

        assert!(prompt.contains("Title 1\nTitle 2\nTitle 3\nTitle 4\nTitle 5"));
        assert!(!prompt.contains("Title 6"));
        assert!(prompt.contains("3 growth suggestions"));
    }

    #[test]
    fn summary_with_few_videos_embeds_all_of_them() {
        let videos = vec![video("Only one"), video("And two")];

        let prompt = channel_summary(&videos);

        assert!(prompt.ends_with("Only one\nAnd two\n"));
    }

    #[test]
    fn title_prompt_carries_title_and_description() {
        let prompt = title_suggestions("My vlog", "A day out");

        assert!(prompt.contains("Title: My vlog\nDescription: A day out"));
        assert!(prompt.contains("suggest 2 alternate options"));
    }
}
