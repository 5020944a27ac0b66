//! Sample decks for testing and demonstration.
//!
//! Each deck exercises a different mix of element kinds and options.

/// One slide: a title, a four-column table with a styled header row and
/// three data rows, and a footnote.
pub fn sales_report_deck() -> &'static str {
    r##"{
  "title": "Q3 Sales Report",
  "layout": "LAYOUT_16x9",
  "slides": [
    {
      "background": "FFFFFF",
      "elements": [
        {
          "type": "text",
          "text": "Q3 Sales by Region",
          "options": { "x": 0.5, "y": 0.3, "w": 9, "h": 0.8, "fontSize": 32, "bold": true, "color": "1F3864" }
        },
        {
          "type": "table",
          "rows": [
            [
              { "text": "Region", "options": { "fill": "4472C4", "color": "FFFFFF", "bold": true } },
              { "text": "July", "options": { "fill": "4472C4", "color": "FFFFFF", "bold": true, "align": "right" } },
              { "text": "August", "options": { "fill": "4472C4", "color": "FFFFFF", "bold": true, "align": "right" } },
              { "text": "September", "options": { "fill": "4472C4", "color": "FFFFFF", "bold": true, "align": "right" } }
            ],
            ["North", 12500, 13200, 14100],
            ["South", 9800, 10100, 9950],
            ["West", 15300, 16750, { "text": 18020, "options": { "bold": true, "color": "2E7D32" } }]
          ],
          "options": { "x": 0.5, "y": 1.4, "w": 9, "fontSize": 14, "border": { "color": "BFBFBF" } }
        },
        {
          "type": "text",
          "text": "Figures in USD thousands.",
          "options": { "x": 0.5, "y": "90%", "w": 9, "fontSize": 10, "italic": true, "color": "7F7F7F" }
        }
      ]
    }
  ]
}"##
}

/// Three slides: a cover with shapes, a bullet slide built from runs, and a
/// closing slide with an inline image.
pub fn talk_deck() -> &'static str {
    r##"{
  "title": "Shipping Faster",
  "slides": [
    {
      "background": "1F3864",
      "elements": [
        { "type": "shape", "shape": "rect", "options": { "x": 0, "y": "70%", "w": "100%", "h": "30%", "fill": "2F5597" } },
        { "type": "shape", "shape": "line", "options": { "x": 1, "y": 2.9, "w": 4, "line": { "color": "FFFFFF" } } },
        {
          "type": "text",
          "text": "Shipping Faster",
          "options": { "x": 1, "y": 1.5, "w": 8, "h": 1.2, "fontSize": 44, "bold": true, "color": "FFFFFF", "valign": "bottom" }
        },
        {
          "type": "text",
          "text": "Lessons from a year of weekly releases",
          "options": { "x": 1, "y": 3.0, "w": 8, "h": 0.6, "fontSize": 20, "color": "D9E1F2" }
        }
      ]
    },
    {
      "elements": [
        { "type": "text", "text": "What changed", "options": { "x": 0.5, "y": 0.3, "w": 9, "h": 0.8, "fontSize": 28, "bold": true } },
        {
          "type": "text",
          "text": [
            { "text": "Smaller batches", "options": { "bold": true, "breakLine": true } },
            { "text": "Every change ships behind a flag.", "options": { "breakLine": true } },
            { "text": "Automated rollback", "options": { "bold": true, "breakLine": true } },
            { "text": "Error budgets trip the switch, not people.", "options": { "color": "C00000" } }
          ],
          "options": { "x": 0.5, "y": 1.3, "w": 6, "h": 3.5, "fontSize": 18, "lineSpacing": 28, "margin": 6 }
        },
        {
          "type": "shape",
          "shape": "roundRect",
          "options": { "x": 7, "y": 1.3, "w": 2.5, "h": 2.5, "fill": { "color": "4472C4", "transparency": 40 }, "rectRadius": 0.25 }
        }
      ]
    },
    {
      "background": { "color": "F2F2F2" },
      "elements": [
        { "type": "text", "text": "Thank you", "options": { "x": 0, "y": "40%", "w": "100%", "fontSize": 40, "align": "center" } },
        {
          "type": "image",
          "options": { "x": 4.5, "y": 3.5, "w": 1, "h": 1, "data": "image/gif;base64,R0lGODlhAQABAAAAACw=", "altText": "logo", "rounding": true }
        }
      ]
    }
  ]
}"##
}

/// A custom banner-sized layout with percentage placement.
pub fn banner_deck() -> &'static str {
    r##"{
  "layout": { "name": "Banner", "width": 12, "height": 3 },
  "slides": [
    {
      "background": "000000",
      "elements": [
        { "type": "text", "text": "Now hiring", "options": { "x": "5%", "y": "25%", "w": "90%", "h": "50%", "fontSize": 54, "color": "FFC000", "align": "center", "valign": "middle" } }
      ]
    }
  ]
}"##
}

/// Every sample deck with its name.
pub fn all_decks() -> [(&'static str, &'static str); 3] {
    [
        ("sales-report", sales_report_deck()),
        ("talk", talk_deck()),
        ("banner", banner_deck()),
    ]
}
