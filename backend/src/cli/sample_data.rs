//! Sample dataset loaded by `vetpath-seed`.
//!
//! Certifications keep the legacy `active` and `pending` statuses so the
//! alias handling is exercised against a freshly seeded database.

use serde_json::{json, Value};

use crate::models::Collection;

/// Every seeded collection with its documents, in insertion order.
pub fn sample_documents() -> Vec<(Collection, Vec<Value>)> {
    vec![
        (Collection::Users, users()),
        (Collection::Courses, courses()),
        (Collection::Certifications, certifications()),
        (Collection::Mentors, mentors()),
        (Collection::Programs, programs()),
        (Collection::Attendance, attendance()),
        (Collection::Resources, resources()),
        (Collection::ForumPosts, forum_posts()),
        (Collection::Skills, skills()),
        (Collection::Mentorship, mentorship()),
        (Collection::Settings, settings()),
    ]
}

fn users() -> Vec<Value> {
    vec![
        json!({
            "id": "u1", "name": "Alex Thompson", "email": "alex.thompson@email.com",
            "role": "veteran", "militaryBranch": "Army", "rank": "Sergeant",
            "enrollmentDate": "2023-10-01", "progress": 82,
            "avatar": "https://picsum.photos/seed/alex/100/100"
        }),
        json!({
            "id": "u2", "name": "Sarah Connor", "email": "sarah.connor@email.com",
            "role": "veteran", "militaryBranch": "Marines", "rank": "Corporal",
            "enrollmentDate": "2023-11-05", "progress": 95,
            "avatar": "https://picsum.photos/seed/sarah/100/100"
        }),
        json!({
            "id": "u3", "name": "Maj. Robert Sterling", "email": "robert.sterling@email.com",
            "role": "teacher", "militaryBranch": "Army", "rank": "Major",
            "enrollmentDate": "2023-01-01", "specialties": ["Project Management", "Leadership"],
            "avatar": "https://picsum.photos/seed/robert/100/100"
        }),
        json!({
            "id": "u4", "name": "Sgt. Maria Rodriguez", "email": "maria.rodriguez@email.com",
            "role": "teacher", "militaryBranch": "Air Force", "rank": "Sergeant",
            "enrollmentDate": "2023-02-15", "specialties": ["Cybersecurity", "IT"],
            "avatar": "https://picsum.photos/seed/maria/100/100"
        }),
        json!({
            "id": "u5", "name": "James Wilson", "email": "james.wilson@email.com",
            "role": "veteran", "militaryBranch": "Navy", "rank": "Petty Officer",
            "enrollmentDate": "2024-01-20", "progress": 60,
            "avatar": "https://picsum.photos/seed/james/100/100"
        }),
    ]
}

fn courses() -> Vec<Value> {
    vec![
        json!({
            "id": "1", "title": "Project Management Professional (PMP) Prep",
            "provider": "VetPath Academy", "category": "Project Management",
            "duration": "40 hours", "progress": 45, "difficulty": "Advanced",
            "image": "https://picsum.photos/seed/pmp/800/400",
            "instructor": "Maj. Robert Sterling",
            "instructorAvatar": "https://picsum.photos/seed/instructor1/100/100",
            "description": "Bridges tactical operations and corporate project management frameworks.",
            "rating": 4.9, "reviews": 128,
            "syllabus": [
                {"id": "m1", "title": "Intro to Agile vs. Waterfall", "duration": "2h"},
                {"id": "m2", "title": "The PMBOK Guide for Veterans", "duration": "5h"},
                {"id": "m3", "title": "Stakeholder Management & Communications", "duration": "4h"}
            ]
        }),
        json!({
            "id": "2", "title": "Cybersecurity Fundamentals",
            "provider": "TechForce Academy", "category": "Information Technology",
            "duration": "30 hours", "progress": 0, "difficulty": "Intermediate",
            "image": "https://picsum.photos/seed/cyber/800/400",
            "instructor": "Sgt. Maria Rodriguez",
            "instructorAvatar": "https://picsum.photos/seed/instructor2/100/100",
            "description": "Essential security practices for protecting civilian organizations.",
            "rating": 4.7, "reviews": 95,
            "syllabus": [
                {"id": "m1", "title": "Network Security Basics", "duration": "3h"},
                {"id": "m2", "title": "Threat Detection and Response", "duration": "4h"},
                {"id": "m3", "title": "Security Policies and Compliance", "duration": "3h"}
            ]
        }),
        json!({
            "id": "3", "title": "Infantry to Security Specialist Transition (MOS 11B)",
            "provider": "VetPath Academy", "category": "Security & Law Enforcement",
            "duration": "35 hours", "progress": 0, "difficulty": "Intermediate",
            "image": "https://picsum.photos/seed/infantry/800/400",
            "instructor": "Maj. Robert Sterling",
            "instructorAvatar": "https://picsum.photos/seed/instructor1/100/100",
            "description": "Turns risk assessment and team coordination into civilian security roles.",
            "rating": 4.6, "reviews": 42,
            "syllabus": [
                {"id": "m1", "title": "Translating Infantry Tactics to Security Protocols", "duration": "4h"},
                {"id": "m2", "title": "Risk Assessment and Threat Mitigation", "duration": "5h"}
            ]
        }),
    ]
}

fn certifications() -> Vec<Value> {
    vec![
        json!({
            "id": "cert1", "name": "Project Management Professional (PMP)",
            "title": "Project Management Professional (PMP)", "issuer": "PMI",
            "issueDate": "2024-01-15", "expiryDate": "2027-01-15",
            "userId": "u1", "veteranId": "u1", "veteranName": "Alex Thompson",
            "status": "active", "credentialId": "PMP-88219-TX", "evidenceUrl": "pmp_cert.pdf",
            "auditTrail": [
                {"id": "a1", "action": "Uploaded", "date": "2024-01-16", "actor": "Alex Thompson"},
                {"id": "a2", "action": "Verified", "date": "2024-01-18", "actor": "Maj. Robert Sterling",
                 "comment": "Credential ID verified against PMI registry."}
            ]
        }),
        json!({
            "id": "cert2", "name": "CompTIA Security+", "title": "CompTIA Security+",
            "issuer": "CompTIA", "issueDate": "2024-05-10", "expiryDate": "2027-05-10",
            "userId": "u1", "veteranId": "u1", "veteranName": "Alex Thompson",
            "status": "pending", "credentialId": "SEC-PLUS-1122", "evidenceUrl": "sec_plus.jpg",
            "auditTrail": [
                {"id": "a3", "action": "Uploaded", "date": "2024-05-11", "actor": "Alex Thompson"}
            ]
        }),
        json!({
            "id": "cert3", "name": "Certified Information Systems Security Professional (CISSP)",
            "title": "Certified Information Systems Security Professional (CISSP)",
            "issuer": "(ISC)²", "issueDate": "2024-04-20", "expiryDate": "2027-04-20",
            "userId": "u2", "veteranId": "u2", "veteranName": "Sarah Connor",
            "status": "pending-review", "credentialId": "CISSP-99001",
            "evidenceUrl": "cissp_proof.pdf",
            "auditTrail": [
                {"id": "a5", "action": "Uploaded", "date": "2024-04-21", "actor": "Sarah Connor"}
            ]
        }),
    ]
}

fn mentors() -> Vec<Value> {
    vec![
        json!({
            "id": "m1", "name": "Sarah Johnson", "role": "Senior Project Manager",
            "company": "Amazon", "militaryBranch": "U.S. Army",
            "specialties": ["Operations", "Agile", "Resume Review"],
            "avatar": "https://picsum.photos/seed/sarah/100/100"
        }),
        json!({
            "id": "m2", "name": "Michael Chen", "role": "Cybersecurity Analyst",
            "company": "Google", "militaryBranch": "U.S. Navy",
            "specialties": ["Network Security", "Threat Analysis", "Career Transition"],
            "avatar": "https://picsum.photos/seed/michael/100/100"
        }),
        json!({
            "id": "m3", "name": "Jessica Lee", "role": "HR Director",
            "company": "Microsoft", "militaryBranch": "U.S. Air Force",
            "specialties": ["Hiring", "Leadership", "Culture Fit"],
            "avatar": "https://picsum.photos/seed/jessica/100/100"
        }),
    ]
}

fn programs() -> Vec<Value> {
    vec![
        json!({
            "id": "prog1", "name": "IT Transition Program", "title": "IT Transition Program",
            "description": "A 12-week intensive pivoting combat-arms veterans into junior sysadmin roles.",
            "startDate": "2024-02-01", "endDate": "2024-04-30",
            "participants": ["u1", "u2", "u5"], "status": "active",
            "instructor": "Sgt. Maria Rodriguez", "maxCapacity": 20
        }),
        json!({
            "id": "prog2", "name": "Project Management Bootcamp",
            "title": "Project Management Bootcamp",
            "description": "Fast-track for NCOs and officers toward PMP certification.",
            "startDate": "2024-01-15", "endDate": "2024-03-10",
            "participants": ["u1", "u3"], "status": "active",
            "instructor": "Maj. Robert Sterling"
        }),
        json!({
            "id": "prog3", "title": "Cloud Foundations Cohort",
            "description": "Intro cohort for cloud support roles.",
            "startDate": "2024-06-01", "participants": [], "status": "upcoming",
            "enrolledCount": 4, "maxCapacity": 15
        }),
    ]
}

fn attendance() -> Vec<Value> {
    vec![
        json!({
            "id": "att1", "studentId": "u1", "studentName": "Alex Thompson", "userId": "u1",
            "branch": "Army", "lastActive": "2024-01-27T10:00:00Z",
            "enrollmentDate": "2023-10-01", "status": "present", "date": "2024-01-27",
            "progress": 82
        }),
        json!({
            "id": "att2", "studentId": "u2", "studentName": "Sarah Connor", "userId": "u2",
            "branch": "Marines", "lastActive": "2024-01-27T09:50:00Z",
            "enrollmentDate": "2023-11-05", "status": "present", "date": "2024-01-27",
            "progress": 95
        }),
        json!({
            "id": "att3", "studentId": "u5", "studentName": "James Wilson", "userId": "u5",
            "branch": "Navy", "lastActive": "2024-01-26T16:00:00Z",
            "enrollmentDate": "2024-01-20", "status": "absent", "date": "2024-01-27",
            "progress": 60
        }),
    ]
}

fn resources() -> Vec<Value> {
    vec![
        json!({
            "id": "r1", "title": "Military Skills Translator Guide", "type": "document",
            "url": "military_skills_guide.pdf", "category": "Career Transition",
            "tags": ["skills", "translation", "guide"],
            "uploadedBy": "Maj. Robert Sterling", "uploadDate": "2024-01-01"
        }),
        json!({
            "id": "r2", "title": "Resume Writing Workshop Recording", "type": "video",
            "url": "resume_workshop.mp4", "category": "Resume Building",
            "tags": ["resume", "workshop", "video"],
            "uploadedBy": "Sgt. Maria Rodriguez", "uploadDate": "2024-01-15"
        }),
    ]
}

fn forum_posts() -> Vec<Value> {
    vec![
        json!({
            "id": "p1", "author": "John Doe (Army Vet)",
            "title": "Tips for translating leadership skills to corporate?",
            "content": "How did you describe commanding a platoon on a tech resume?",
            "date": "2024-01-25T14:30:00Z", "likes": 24, "replies": 12
        }),
        json!({
            "id": "p2", "author": "Jane Smith (Navy Vet)", "title": "Best resources for PMP prep?",
            "content": "Starting the PMP course next week. Any recommended study materials?",
            "date": "2024-01-24T09:15:00Z", "likes": 18, "replies": 8
        }),
    ]
}

fn skills() -> Vec<Value> {
    vec![
        json!({"id": "skill1", "name": "Leadership", "category": "Soft Skills",
               "level": "expert", "userId": "u1", "verified": true}),
        json!({"id": "skill2", "name": "Project Management", "category": "Professional",
               "level": "advanced", "userId": "u1", "verified": true}),
        json!({"id": "skill3", "name": "Cybersecurity", "category": "Technical",
               "level": "intermediate", "userId": "u5", "verified": false}),
    ]
}

fn mentorship() -> Vec<Value> {
    vec![json!({
        "id": "ment1", "mentorId": "m1", "menteeId": "u1", "startDate": "2024-01-15",
        "endDate": null, "status": "active", "focusArea": "Project Management Transition"
    })]
}

fn settings() -> Vec<Value> {
    vec![json!({"id": "set1", "userId": "u1", "key": "emailNotifications", "value": true})]
}
