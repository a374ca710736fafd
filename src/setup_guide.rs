//! Deployment guide for the spreadsheet side of the form

/// Apps Script the web app endpoint runs. It appends one row per response
/// and answers with the `{"result": ...}` envelope the client expects.
pub const APPS_SCRIPT_SOURCE: &str = r#"function doPost(e) {
  try {
    var sheet = SpreadsheetApp.getActiveSpreadsheet().getSheetByName('Respostas');
    if (!sheet) {
      sheet = SpreadsheetApp.getActiveSpreadsheet().insertSheet('Respostas');
      sheet.appendRow(['Timestamp', 'Score', 'Reason', 'Feedback']);
    }

    var data = JSON.parse(e.postData.contents);

    var score = data.score;
    var reason = data.reason || '';
    var feedback = data.feedback || '';

    sheet.appendRow([new Date(), score, reason, feedback]);

    return ContentService.createTextOutput(JSON.stringify({
      'result': 'success'
    })).setMimeType(ContentService.MimeType.JSON);

  } catch (error) {
    return ContentService.createTextOutput(JSON.stringify({
      'result': 'error',
      'error': error.toString()
    })).setMimeType(ContentService.MimeType.JSON);
  }
}
"#;

/// Steps shown above the script in the Setup view
pub const SETUP_STEPS: &[&str] = &[
    "Create a new spreadsheet at sheets.new.",
    "Open Extensions > Apps Script.",
    "Delete the existing code and paste the script below (press 'c' to copy it).",
    "Save the project.",
    "Click Deploy > New deployment.",
    "Click the gear icon ('Select type') and choose Web app.",
    "Under 'Who has access', select Anyone.",
    "Click Deploy and grant the requested permissions.",
    "Copy the Web app URL and paste it into Settings (F3).",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_answers_with_result_envelope() {
        assert!(APPS_SCRIPT_SOURCE.contains("function doPost(e)"));
        assert!(APPS_SCRIPT_SOURCE.contains("'result': 'success'"));
        assert!(APPS_SCRIPT_SOURCE.contains("'result': 'error'"));
    }

    #[test]
    fn test_steps_end_with_settings_hint() {
        assert!(SETUP_STEPS.last().is_some_and(|s| s.contains("F3")));
    }
}
