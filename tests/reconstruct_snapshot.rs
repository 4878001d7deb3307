use cantoral_import_rust::align::reconstruct_fixed_width;

#[test]
fn fixed_width_sheet() {
    let sheet = "CARNAVALITO DEL MISIONERO\n\nDO        DO7\nEsta es la luz de Cristo,\nFA          DO\nyo la haré brillar.\n\nCORO:\nSOL        FA        DO\nBrillará, brillará, brillará.\n";
    let rendered = reconstruct_fixed_width(sheet);
    insta::assert_snapshot!("fixed_width_sheet", rendered);
}
