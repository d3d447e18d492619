use super::{
    AnnotationNote, AnnotationSpec, SceneDescriptor, SceneView, TemplateParam, TemplateSegment,
    TextTemplate,
};

/// Built-in three-scene story about catalog growth.
#[must_use]
pub fn default_scenes() -> Vec<SceneDescriptor> {
    vec![
        SceneDescriptor::new(
            TextTemplate::literal("The Content Explosion"),
            TextTemplate::literal(
                "Netflix began as a DVD service, but its shift to streaming changed everything. \
                 This chart shows the total number of movies and TV shows added to the platform \
                 each year. Notice the dramatic acceleration after 2015.",
            ),
            SceneView::YearlyTotals,
        )
        .with_annotation(AnnotationSpec {
            note: AnnotationNote {
                title: "The Great Acceleration".to_owned(),
                label: "Content additions surged after 2015 as Netflix pushed heavily into \
                        original programming."
                    .to_owned(),
                wrap: 200.0,
            },
            x: 650.0,
            y: 100.0,
            dx: -150.0,
            dy: 30.0,
        }),
        SceneDescriptor::new(
            TextTemplate::literal("The Strategic Shift to Television"),
            TextTemplate::literal(
                "The growth wasn't just quantity; it was a pivot to TV. \
                 <strong>Click any year's bar</strong> to see which countries produced the \
                 content for that specific year.",
            ),
            SceneView::YearlyByCategory,
        )
        .with_annotation(AnnotationSpec {
            note: AnnotationNote {
                title: "Pivoting to Series".to_owned(),
                label: "By 2018, TV show additions nearly equaled movies, highlighting the new \
                        focus on binge-able series."
                    .to_owned(),
                wrap: 200.0,
            },
            x: 720.0,
            y: 150.0,
            dx: -250.0,
            dy: 20.0,
        }),
        SceneDescriptor::new(
            TextTemplate::from_segments(vec![
                TemplateSegment::Text("Top Countries in ".to_owned()),
                TemplateSegment::Param(TemplateParam::Year),
            ]),
            TextTemplate::from_segments(vec![
                TemplateSegment::Text(
                    "This chart shows the top content-producing countries (excluding the US) \
                     for content released in "
                        .to_owned(),
                ),
                TemplateSegment::Param(TemplateParam::Year),
                TemplateSegment::Text(
                    ". You can hover over a bar to see the exact count.".to_owned(),
                ),
            ]),
            SceneView::TopCountries,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use crate::scene::SceneRegistry;

    use super::*;

    #[test]
    fn built_in_scenes_pass_registry_validation() {
        let registry = SceneRegistry::new(default_scenes()).expect("valid registry");
        assert_eq!(registry, SceneRegistry::default());
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.year_picker(), Some(1));
    }

    #[test]
    fn built_in_templates_match_their_source_form() {
        let scenes = default_scenes();
        assert_eq!(scenes[2].title.to_string(), "Top Countries in {year}");
        assert!(scenes[2].narrative.to_string().contains("released in {year}."));
        assert!(scenes[1].narrative.to_string().contains("<strong>"));
        assert!(scenes[2].annotation.is_none());
    }
}
