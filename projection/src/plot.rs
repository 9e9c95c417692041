//! Scatter-plot rendering for projected embeddings.
//!
//! The artifact is a self-contained HTML document: the point data is
//! baked in and the only external reference is the charting library's
//! CDN script, so the file opens standalone in a browser.

use std::path::Path;

use tracing::info;

use crate::error::{ProjectionError, Result};
use crate::pca::ProjectedPoint;

/// A renderable 2-D scatter plot of labeled points.
///
/// Each marker carries its source label verbatim and a sequential
/// color index equal to its position in the input (a rendering aid
/// only, not semantically meaningful).
#[derive(Debug)]
pub struct ScatterPlot {
    points: Vec<ProjectedPoint>,
    labels: Vec<String>,
    title: String,
}

impl ScatterPlot {
    /// Create a plot from points and their index-aligned labels.
    ///
    /// Fails with [`ProjectionError::ArityMismatch`] if the counts
    /// differ.
    pub fn new(points: Vec<ProjectedPoint>, labels: Vec<String>) -> Result<Self> {
        if points.len() != labels.len() {
            return Err(ProjectionError::ArityMismatch {
                points: points.len(),
                labels: labels.len(),
            });
        }

        Ok(Self {
            points,
            labels,
            title: "2D Embedding Visualization (PCA)".to_string(),
        })
    }

    /// Set the plot title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Number of points in the plot.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the plot has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Render the plot as a self-contained HTML document.
    pub fn to_html(&self) -> Result<String> {
        let xs: Vec<f64> = self.points.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = self.points.iter().map(|p| p.y).collect();
        let colors: Vec<usize> = (0..self.points.len()).collect();

        let x_json = serde_json::to_string(&xs)?;
        let y_json = serde_json::to_string(&ys)?;
        let text_json = serde_json::to_string(&self.labels)?;
        let color_json = serde_json::to_string(&colors)?;
        let title_json = serde_json::to_string(&self.title)?;

        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Embedding Visualization</title>
    <script src="https://cdn.plot.ly/plotly-latest.min.js"></script>
</head>
<body>
    <div id="plot" style="width:100%;height:100vh;"></div>
    <script>
        const data = [{{
            x: {x_json},
            y: {y_json},
            mode: 'markers+text',
            type: 'scatter',
            text: {text_json},
            textposition: 'top center',
            marker: {{
                size: 12,
                color: {color_json},
                colorscale: 'Viridis',
                showscale: true,
                colorbar: {{ title: 'Index' }}
            }}
        }}];

        const layout = {{
            title: {title_json},
            xaxis: {{ title: 'PC1' }},
            yaxis: {{ title: 'PC2' }},
            hovermode: 'closest'
        }};

        Plotly.newPlot('plot', data, layout);
    </script>
</body>
</html>
"#
        ))
    }

    /// Render and write the plot to `path`.
    ///
    /// An existing file at `path` is overwritten without warning.
    pub fn write_html(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let html = self.to_html()?;
        std::fs::write(path, html)?;

        info!("Wrote plot with {} points to {}", self.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn points(n: usize) -> Vec<ProjectedPoint> {
        (0..n)
            .map(|i| ProjectedPoint {
                x: i as f64,
                y: i as f64 + 0.5,
                source_index: i,
            })
            .collect()
    }

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_arity_mismatch() {
        let err = ScatterPlot::new(points(3), labels(&["a", "b"])).unwrap_err();
        assert!(matches!(
            err,
            ProjectionError::ArityMismatch {
                points: 3,
                labels: 2
            }
        ));
    }

    #[test]
    fn test_html_contains_every_label_once() {
        let names = ["Car", "Tiger", "Cricket", "Fish", "City"];
        let plot = ScatterPlot::new(points(5), labels(&names)).unwrap();
        let html = plot.to_html().unwrap();

        for name in names {
            let needle = format!("\"{name}\"");
            assert_eq!(
                html.matches(&needle).count(),
                1,
                "label {name} should appear exactly once"
            );
        }
    }

    #[test]
    fn test_html_data_arrays() {
        let plot = ScatterPlot::new(points(5), labels(&["a", "b", "c", "d", "e"])).unwrap();
        let html = plot.to_html().unwrap();

        // Coordinates and sequential color indices baked into the document.
        assert!(html.contains("x: [0.0,1.0,2.0,3.0,4.0]"));
        assert!(html.contains("y: [0.5,1.5,2.5,3.5,4.5]"));
        assert!(html.contains("color: [0,1,2,3,4]"));
    }

    #[test]
    fn test_html_is_self_contained() {
        let plot = ScatterPlot::new(points(2), labels(&["a", "b"])).unwrap();
        let html = plot.to_html().unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("cdn.plot.ly"));
        assert!(html.contains("Plotly.newPlot"));
    }

    #[test]
    fn test_labels_are_json_escaped() {
        let plot = ScatterPlot::new(points(1), labels(&["say \"hi\"</script>"])).unwrap();
        let html = plot.to_html().unwrap();

        assert!(html.contains(r#"say \"hi\"</script>"#));
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.html");
        std::fs::write(&path, "old contents").unwrap();

        let plot = ScatterPlot::new(points(2), labels(&["a", "b"])).unwrap();
        plot.write_html(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("Plotly.newPlot"));
        assert!(!written.contains("old contents"));
    }

    #[test]
    fn test_title_override() {
        let plot = ScatterPlot::new(points(1), labels(&["a"]))
            .unwrap()
            .with_title("Corpus Map");
        let html = plot.to_html().unwrap();
        assert!(html.contains("title: \"Corpus Map\""));
    }
}
