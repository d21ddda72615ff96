//! Text reporter for terminal output.

use super::{RatingSection, ReportError, ReportFormat, ReportGenerator};
use crate::model::{Ingredient, Product};
use crate::score::HealthTier;
use crate::workflow::{ScanOutcome, ScanReport};
use std::fmt::Write;

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

const fn tier_color(tier: HealthTier) -> &'static str {
    match tier {
        HealthTier::Healthy => "green",
        HealthTier::Neutral => "yellow",
        HealthTier::Harmful => "red",
    }
}

/// Text reporter for shell output
pub struct TextReporter {
    /// Use colored output
    colored: bool,
}

impl TextReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn score(&self, score: u8, width: usize) -> String {
        let tier = HealthTier::from_score(score);
        self.color(&format!("{score:>width$}"), tier_color(tier))
    }

    fn write_ingredient(&self, out: &mut String, ing: &Ingredient) -> std::fmt::Result {
        writeln!(
            out,
            "  {}  {:<10}  {}",
            self.score(ing.score, 3),
            ing.category.badge_label(),
            ing.display_name()
        )?;
        if !ing.description.is_empty() {
            writeln!(out, "       {}", self.color(&ing.description, "dim"))?;
        }
        Ok(())
    }
}

impl Default for TextReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for TextReporter {
    fn scan_report(&self, report: &ScanReport) -> Result<String, ReportError> {
        match (&report.outcome, &report.product) {
            (ScanOutcome::Completed { persisted }, Some(product)) => {
                let mut out = self.product_report(product)?;
                if !persisted {
                    writeln!(
                        out,
                        "\n{}",
                        self.color("Продукт не сохранён в историю", "yellow")
                    )?;
                }
                Ok(out)
            }
            (ScanOutcome::Failed { reason }, _) => {
                let n = reason.notification();
                Ok(format!("{}\n", self.color(&n.to_string(), "red")))
            }
            _ => Ok("Изображение не выбрано\n".to_string()),
        }
    }

    fn product_report(&self, product: &Product) -> Result<String, ReportError> {
        let mut out = String::new();
        let tier = HealthTier::from_score(product.score);

        writeln!(out, "{}", self.color(&product.name, "bold"))?;
        writeln!(out, "{}", self.color(&"─".repeat(40), "dim"))?;
        writeln!(
            out,
            "Оценка:  {}/100  {}",
            self.score(product.score, 0),
            tier.verdict()
        )?;
        writeln!(out, "Дата:    {}", product.scan_date_label())?;
        writeln!(out, "ID:      {}", product.id)?;
        writeln!(out)?;
        writeln!(out, "Ингредиенты ({}):", product.ingredients.len())?;
        for ing in &product.ingredients {
            self.write_ingredient(&mut out, ing)?;
        }
        Ok(out)
    }

    fn history_report(&self, products: &[&Product]) -> Result<String, ReportError> {
        if products.is_empty() {
            return Ok("История пуста\n".to_string());
        }
        let mut out = String::new();
        for product in products {
            writeln!(
                out,
                "{}  {}  {}  ({} ингр.)",
                self.score(product.score, 3),
                product.scan_date_label(),
                product.name,
                product.ingredients.len()
            )?;
        }
        Ok(out)
    }

    fn rating_report(&self, sections: &[RatingSection<'_>]) -> Result<String, ReportError> {
        let mut out = String::new();
        for (i, section) in sections.iter().enumerate() {
            if i > 0 {
                writeln!(out)?;
            }
            writeln!(out, "{}", self.color(section.title, "bold"))?;
            if section.ingredients.is_empty() {
                writeln!(out, "  Нет данных")?;
            }
            for (rank, ing) in section.ingredients.iter().enumerate() {
                write!(out, "{:>2}.", rank + 1)?;
                self.write_ingredient(&mut out, ing)?;
            }
        }
        Ok(out)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Identifier, ProductId};
    use chrono::{TimeZone, Utc};

    fn product() -> Product {
        let mut product = Product::local(
            "Новый продукт",
            64,
            vec![
                Ingredient::new("Сахар", 45, Category::Neutral)
                    .with_id(4)
                    .with_description("Быстрые углеводы"),
                Ingredient::new("Витамин B12", 95, Category::Healthy),
            ],
            Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        );
        product.id = ProductId::Persisted(Identifier::Number(17));
        product
    }

    #[test]
    fn test_product_report() {
        let out = TextReporter::new().no_color().product_report(&product()).unwrap();
        insta::assert_snapshot!(out, @r"
        Новый продукт
        ────────────────────────────────────────
        Оценка:  64/100  ⚠️ Умеренно вредный
        Дата:    01.03.2024
        ID:      17

        Ингредиенты (2):
           45  Нейтрально  Сахар
               Быстрые углеводы
           95  Полезно     Витамин B12
        ");
    }

    #[test]
    fn test_history_report_empty() {
        let out = TextReporter::new().no_color().history_report(&[]).unwrap();
        assert_eq!(out, "История пуста\n");
    }

    #[test]
    fn test_rating_report_numbers_entries() {
        let harmful = vec![
            Ingredient::new("Е250 (Нитрит натрия)", 15, Category::Harmful),
            Ingredient::new("Е621 (Глутамат натрия)", 25, Category::Harmful),
        ];
        let out = TextReporter::new()
            .no_color()
            .rating_report(&[RatingSection {
                title: "Самые вредные",
                ingredients: &harmful,
            }])
            .unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "Самые вредные");
        assert_eq!(lines[1], " 1.   15  Вредно      Е250 (Нитрит натрия)");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_colored_score_uses_tier_color() {
        let out = TextReporter::new().history_report(&[&product()]).unwrap();
        assert!(out.contains("\x1b[33m 64\x1b[0m"));
    }
}
