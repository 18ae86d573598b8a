//! Hero section: slides, countdown, call-to-action buttons and trust badges.

use std::fmt::Write as _;

use super::html_escape;
use crate::models::{Hero, Slide};
use crate::services::countdown::day_label;

/// Whether the countdown elements are shown.
///
/// Requires a countdown block and at least one day remaining.
#[must_use]
pub fn countdown_visible(hero: &Hero, days_left: u32) -> bool {
    hero.countdown.is_some() && days_left > 0
}

/// Renders the hero section.
pub fn render_hero(output: &mut String, hero: &Hero, days_left: u32) {
    let show_countdown = countdown_visible(hero, days_left);

    output.push_str("<section id=\"home\" class=\"hero\">\n");

    if show_countdown {
        let _ = writeln!(
            output,
            "<div class=\"countdown-badge\"><span class=\"days\">{}</span>\
             <span class=\"unit\">{} left</span></div>",
            days_left,
            day_label(days_left)
        );
    }

    output.push_str("<div class=\"hero-slides\" data-autoplay-ms=\"5000\">\n");
    for (index, slide) in hero.slides.iter().enumerate() {
        render_slide(output, hero, slide, index, show_countdown);
    }
    output.push_str("</div>\n");

    output.push_str("<div class=\"trust-badges\">\n");
    for badge in &hero.trust_badges {
        let _ = writeln!(
            output,
            "<div class=\"badge\"><p class=\"value\">{}</p><p class=\"label\">{}</p></div>",
            html_escape(&badge.value),
            html_escape(&badge.label)
        );
    }
    output.push_str("</div>\n");

    output.push_str(
        "<a class=\"scroll-down\" href=\"#about\" aria-label=\"Scroll down\">&#8964;</a>\n",
    );
    output.push_str("</section>\n");
}

fn render_slide(
    output: &mut String,
    hero: &Hero,
    slide: &Slide,
    index: usize,
    show_countdown: bool,
) {
    let _ = writeln!(
        output,
        "<article class=\"hero-slide\" data-slide=\"{}\">",
        index
    );
    let _ = writeln!(
        output,
        "<img src=\"{}\" alt=\"Sacred Kaaba in Mecca\">",
        html_escape(&slide.image)
    );
    output.push_str("<div class=\"hero-content\">\n");

    let _ = writeln!(
        output,
        "<p class=\"bismillah\">{}</p>",
        html_escape(&slide.bismillah)
    );
    if let Some(translation) = slide.translation.as_deref().filter(|t| !t.is_empty()) {
        let _ = writeln!(
            output,
            "<p class=\"translation\">{}</p>",
            html_escape(translation)
        );
    }

    let _ = writeln!(
        output,
        "<h1>{} <span class=\"highlight\">{}</span></h1>",
        html_escape(&slide.heading_pre),
        html_escape(&slide.heading_span)
    );
    let _ = writeln!(
        output,
        "<p class=\"subheading\">{}</p>",
        html_escape(&slide.subheading)
    );

    if let Some(countdown) = hero.countdown.as_ref().filter(|_| show_countdown) {
        let _ = writeln!(
            output,
            "<div class=\"deadline\"><p>{}</p><p class=\"supporting\">{}</p></div>",
            html_escape(&countdown.deadline_text),
            html_escape(&countdown.supporting_text)
        );
    }

    output.push_str("<div class=\"hero-buttons\">");
    let _ = write!(
        output,
        "<a class=\"button button-primary\" href=\"#packages\">{}</a>",
        html_escape(&hero.buttons.explore)
    );
    let _ = write!(
        output,
        "<a class=\"button button-secondary\" href=\"#contact\">{}</a>",
        html_escape(&hero.buttons.contact)
    );
    output.push_str("</div>\n");

    output.push_str("</div>\n</article>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Countdown, HeroButtons, TrustBadge};

    fn hero(with_countdown: bool) -> Hero {
        Hero {
            slides: vec![
                Slide {
                    image: "one.jpg".into(),
                    bismillah: "Bismillah".into(),
                    translation: Some("In the name of God".into()),
                    heading_pre: "Begin Your".into(),
                    heading_span: "Journey".into(),
                    subheading: "First".into(),
                },
                Slide {
                    image: "two.jpg".into(),
                    heading_pre: "Visit".into(),
                    heading_span: "Madinah".into(),
                    ..Slide::default()
                },
            ],
            countdown: with_countdown.then(|| Countdown {
                target_date: Some("2027-02-10".into()),
                deadline_text: "Book before Ramadan".into(),
                supporting_text: "Few seats left".into(),
            }),
            buttons: HeroButtons {
                explore: "Explore".into(),
                contact: "Contact".into(),
            },
            trust_badges: vec![TrustBadge {
                value: "15+".into(),
                label: "Years".into(),
            }],
        }
    }

    fn render(hero: &Hero, days: u32) -> String {
        let mut out = String::new();
        render_hero(&mut out, hero, days);
        out
    }

    #[test]
    fn test_slides_rendered_in_order() {
        let html = render(&hero(false), 0);
        let first = html.find("data-slide=\"0\"").unwrap();
        let second = html.find("data-slide=\"1\"").unwrap();
        assert!(first < second);
        assert!(html.contains("<h1>Begin Your <span class=\"highlight\">Journey</span></h1>"));
        assert!(html.contains("In the name of God"));
        // Second slide has no translation
        assert_eq!(html.matches("class=\"translation\"").count(), 1);
    }

    #[test]
    fn test_countdown_badge_plural_and_singular() {
        let html = render(&hero(true), 12);
        assert!(html.contains(
            "<span class=\"days\">12</span><span class=\"unit\">days left</span>"
        ));
        assert_eq!(html.matches("Book before Ramadan").count(), 2);

        let html = render(&hero(true), 1);
        assert!(html.contains("<span class=\"unit\">day left</span>"));
    }

    #[test]
    fn test_countdown_hidden_at_zero_or_without_block() {
        let html = render(&hero(true), 0);
        assert!(!html.contains("countdown-badge"));
        assert!(!html.contains("Book before Ramadan"));

        let html = render(&hero(false), 30);
        assert!(!html.contains("countdown-badge"));
        assert!(!countdown_visible(&hero(false), 30));
    }

    #[test]
    fn test_buttons_and_badges() {
        let html = render(&hero(false), 0);
        assert!(html.contains("href=\"#packages\">Explore</a>"));
        assert!(html.contains("href=\"#contact\">Contact</a>"));
        assert!(html.contains("<p class=\"value\">15+</p><p class=\"label\">Years</p>"));
        assert!(html.contains("href=\"#about\""));
    }

    #[test]
    fn test_empty_hero_renders_shell() {
        let html = render(&Hero::default(), 5);
        assert!(html.contains("id=\"home\""));
        assert!(!html.contains("hero-slide\""));
        assert!(!html.contains("countdown-badge"));
    }
}
