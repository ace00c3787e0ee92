//! Localized status texts shown in the results container

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Messages {
    /// Shown while a filter request is in flight
    pub loading: String,
    /// Shown when a filter matched nothing
    pub no_results: String,
    /// Shown when the backend could not be reached or answered non-2xx
    pub error: String,
}

impl Messages {
    /// Hindi texts, as shipped on the deployed dashboard
    pub fn hindi() -> Self {
        Self {
            loading: "फ़िल्टर चल रहा है... कृपया प्रतीक्षा करें।".to_string(),
            no_results: "इस फ़िल्टर के लिए कोई स्टॉक नहीं मिला।".to_string(),
            error: "डेटा लाने में त्रुटि हुई। कृपया सुनिश्चित करें कि आपका Python बैकएंड Vercel पर सही से चल रहा है।"
                .to_string(),
        }
    }

    pub fn english() -> Self {
        Self {
            loading: "Running filter... please wait.".to_string(),
            no_results: "No stocks matched this filter.".to_string(),
            error: "Could not load data. Make sure the screening backend is running.".to_string(),
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::hindi()
    }
}
