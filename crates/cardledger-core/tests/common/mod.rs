//! Sample statements shared by the integration tests.
//!
//! Each sample mimics the text a PDF text layer yields for that issuer:
//! header block, summary block (inline labels or label rows followed by
//! value rows) and the transaction table.

#![allow(dead_code)]

pub fn hdfc() -> Vec<Vec<&'static str>> {
    vec![
        vec![
            "HDFC Bank Credit Card Statement",
            "Card No: 4375 XXXX XXXX 1234",
            "Name : RAHUL SHARMA  Email : rahul@example.com",
            "Statement Date: 01/04/2024",
            "Statement Period: 01/03/2024 to 31/03/2024",
            "Payment Due Date   Total Dues   Minimum Amount Due",
            "15/04/2024   45,230.50   2,262.00",
            "Credit Limit   Available Credit Limit   Available Cash Limit",
            "2,00,000.00   1,54,769.50   40,000.00",
            "Date Transaction Description Amount (in Rs.)",
            "01/03/2024 14:22:05 AMAZON PAY INDIA 1,250.00",
            "05/03/2024 SWIGGY 450.00",
            "BANGALORE IN",
            "10/03/2024 NETBANKING PAYMENT RECEIVED 5,000.00 Cr",
        ],
        vec![
            "Page 2 of 2",
            "15/03/2024 IRCTC WEB 2,300.00",
            "Reward Points Summary",
            "Opening 1,200 Earned 300",
        ],
    ]
}

pub fn icici() -> Vec<Vec<&'static str>> {
    vec![vec![
        "ICICI Bank Credit Card Statement",
        "MR RAHUL SHARMA",
        "Statement Date April 2, 2024",
        "Statement period : March 2, 2024 to April 1, 2024",
        "Credit Limit (including cash) Available Credit (including cash) Cash Limit",
        "1,00,000.00 62,500.00 20,000.00",
        "Total Amount due Minimum Amount due",
        "37,500.00 1,875.00",
        "Date SerNo. Transaction Details Reward Points Intl.# amount Amount (in`)",
        "02/03/2024 10987654321 SWIGGY BANGALORE IN 9 450.00",
        "05/03/2024 10987654322 BBPS PAYMENT RECEIVED 0 2,000.00 CR",
    ]]
}

pub fn axis() -> Vec<Vec<&'static str>> {
    vec![vec![
        "Flipkart Axis Bank Credit Card Statement",
        "Card No  Credit Limit  Available Credit Limit",
        "534680******1234 1,50,000.00 75,000.00",
        "Statement Period 01/03/2024 - 31/03/2024",
        "Total Payment Due   Minimum Payment Due   Statement Date   Payment Due Date",
        "45,000.00 Dr   2,250.00 Dr   01/04/2024   20/04/2024",
        "DATE TRANSACTION DETAILS AMOUNT (Rs.)",
        "01/03/2024 FLIPKART INTERNET 1,250.00 Dr",
        "03/03/2024",
        "AMAZON SELLER SERVICES 999.00 Dr",
        "05/03/2024 BBPS PAYMENT RECEIVED 5,000.00 Cr",
        "06/03/2024 UNSIGNED MERCHANT 10.00",
    ]]
}

pub fn idfc() -> Vec<Vec<&'static str>> {
    vec![vec![
        "IDFC FIRST Bank Credit Card Statement",
        "Customer Name: Priya Nair",
        "Statement Period: 01/03/2024 - 31/03/2024",
        "Credit Limit r2,00,000.00",
        "Total Amount Due Minimum Amount Due",
        "r12,640.00 r632.00",
        "Date  Transaction Details  Amount",
        "03/03/2024 ZOMATO GURGAON r 640.00",
        "04/03/2024 PAYMENT THANK YOU ₹12,000.00 CR",
    ]]
}

pub fn indian_bank() -> Vec<Vec<&'static str>> {
    vec![vec![
        "Indian Bank Credit Card Statement",
        "Mr. Arjun Kumar",
        "Statement Date  Statement Period  Payment Due Date",
        "01-04-2024 01-03-2024 - 31-03-2024 18-04-2024",
        "Credit Limit Total Dues Minimum Due",
        "50,000.00 3,450.00 172.50",
        "05-MAR-24 SWIGGY BANGALORE Dr 450.00",
        "12-MAR-24 PAYMENT RECEIVED Cr 1,000.00",
    ]]
}

pub fn generic() -> Vec<Vec<&'static str>> {
    vec![vec![
        "ACME CARD SERVICES",
        "01/03/2024 COFFEE HOUSE 90.00",
        "02/03/2024 REFUND 40.00 Cr",
    ]]
}

pub fn all() -> Vec<Vec<Vec<&'static str>>> {
    vec![hdfc(), icici(), axis(), idfc(), indian_bank(), generic()]
}
