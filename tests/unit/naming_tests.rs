// Output naming tests

use photomark::batch::ExportOptions;
use photomark::imaging::OutputFormat;
use rstest::rstest;

#[rstest]
#[case("DSC_0042.JPG", OutputFormat::Jpeg, "Logo_DSC_0042.jpg")]
#[case("DSC_0042.JPG", OutputFormat::Png, "Logo_DSC_0042.png")]
#[case("holiday.final.png", OutputFormat::Jpeg, "Logo_holiday.jpg")]
#[case("C:\\Users\\me\\sunset.heic", OutputFormat::Jpeg, "Logo_sunset.jpg")]
fn test_single_download_name(
    #[case] identifier: &str,
    #[case] format: OutputFormat,
    #[case] expected: &str,
) {
    let options = ExportOptions {
        format,
        ..Default::default()
    };
    assert_eq!(options.single_file_name(identifier), expected);
}

#[rstest]
#[case("Logo_", "a.jpg", "Logo_a.jpg")]
#[case("Client-", "holiday.final.png", "Client-holiday.final.png")]
fn test_archive_entry_name(#[case] prefix: &str, #[case] identifier: &str, #[case] expected: &str) {
    let options = ExportOptions {
        name_prefix: prefix.to_string(),
        ..Default::default()
    };
    assert_eq!(options.archive_entry_name(identifier), expected);
}
