//! Payloads shaped like the live API, trimmed to the keys the entities read.

use serde_json::{Value, json};

pub(crate) fn divisions() -> Value {
    json!([
        {
            "Alias": "MATH",
            "Name": "Mathematics and Computer Science",
            "Oid": "e1b1b3a5-0000-4000-8000-000000000001"
        },
        {
            "Alias": "HIST",
            "Name": "History",
            "Oid": "e1b1b3a5-0000-4000-8000-000000000002"
        }
    ])
}

pub(crate) fn study_levels() -> Value {
    json!([
        {
            "StudyLevelName": "Бакалавриат",
            "StudyLevelNameEnglish": "Bachelor studies",
            "HasCourse6": false,
            "StudyProgramCombinations": [
                {
                    "Name": "Математика",
                    "NameEnglish": "Mathematics",
                    "AdmissionYears": [
                        {
                            "StudyProgramId": 12345,
                            "YearName": "2024",
                            "YearNumber": 2024,
                            "IsEmpty": false
                        },
                        {
                            "StudyProgramId": 12346,
                            "YearName": "2023",
                            "YearNumber": 2023,
                            "IsEmpty": true
                        }
                    ]
                }
            ]
        },
        {
            "StudyLevelName": "Магистратура",
            "StudyProgramCombinations": []
        }
    ])
}

pub(crate) fn groups() -> Value {
    json!({
        "Id": 12345,
        "Groups": [
            {
                "StudentGroupId": 334001,
                "StudentGroupName": "24.Б01-мм",
                "StudentGroupStudyForm": "очная",
                "StudentGroupProfiles": "Алгебра"
            },
            {
                "StudentGroupId": 334002,
                "StudentGroupName": "24.Б02-мм",
                "StudentGroupStudyForm": "очная",
                "StudentGroupProfiles": null
            }
        ]
    })
}

pub(crate) fn week() -> Value {
    json!({
        "StudentGroupId": 334001,
        "StudentGroupDisplayName": "Группа 24.Б01-мм",
        "TimeTableDisplayName": "Все занятия",
        "WeekDisplayText": "2 сентября — 8 сентября",
        "WeekMonday": "2024-09-02",
        "PreviousWeekMonday": "2024-08-26",
        "NextWeekMonday": "2024-09-09",
        "IsPreviousWeekReferenceAvailable": true,
        "IsNextWeekReferenceAvailable": true,
        "Days": [
            {
                "Day": "2024-09-02T00:00:00",
                "DayString": "понедельник, 2 сентября",
                "DayStudyEvents": [
                    {
                        "Start": "2024-09-02T09:30:00",
                        "End": "2024-09-02T11:05:00",
                        "Subject": "Алгебра, лекция",
                        "TimeIntervalString": "09:30–11:05",
                        "LocationsDisplayText": "Университетская наб., д. 7-9, 1304",
                        "EducatorsDisplayText": "Иванов И. И.",
                        "IsCancelled": false,
                        "StudyEventsTimeTableKindCode": 1,
                        "ContingentUnitName": "24.Б01-мм",
                        "EventLocations": [
                            {
                                "DisplayName": "Университетская наб., д. 7-9, 1304",
                                "IsEmpty": false,
                                "HasGeographicCoordinates": true,
                                "Latitude": 59.9415,
                                "Longitude": 30.2988,
                                "EducatorsDisplayText": "Иванов И. И."
                            }
                        ]
                    },
                    {
                        "Start": "2024-09-02T11:15:00",
                        "End": "2024-09-02T12:50:00",
                        "Subject": "Физическая культура",
                        "TimeIntervalString": "11:15–12:50",
                        "StudyEventsTimeTableKindCode": null,
                        "ContingentUnitName": null,
                        "EventLocations": [
                            { "DisplayName": "Address A 101-A" },
                            { "IsEmpty": true }
                        ]
                    },
                    {
                        "Start": "2024-09-02T13:40:00",
                        "End": "2024-09-02T15:15:00",
                        "TimeIntervalString": "13:40–15:15",
                        "StudyEventsTimeTableKindCode": 2,
                        "ContingentUnitName": null,
                        "EventLocations": []
                    }
                ]
            },
            {
                "Day": "2024-09-04T00:00:00",
                "DayString": "среда, 4 сентября",
                "DayStudyEvents": [
                    {
                        "Start": "2024-09-04T15:25:00",
                        "End": "2024-09-04T17:00:00",
                        "Subject": "История",
                        "TimeIntervalString": "15:25–17:00",
                        "IsCancelled": true,
                        "StudyEventsTimeTableKindCode": 1,
                        "ContingentUnitName": "24.Б01-мм",
                        "EventLocations": [
                            { "DisplayName": "Нет данных" }
                        ]
                    }
                ]
            }
        ]
    })
}

pub(crate) fn next_week() -> Value {
    json!({
        "StudentGroupId": 334001,
        "StudentGroupDisplayName": "Группа 24.Б01-мм",
        "WeekDisplayText": "9 сентября — 15 сентября",
        "WeekMonday": "2024-09-09",
        "PreviousWeekMonday": "2024-09-02",
        "NextWeekMonday": "2024-09-16",
        "IsPreviousWeekReferenceAvailable": true,
        "IsNextWeekReferenceAvailable": false,
        "Days": []
    })
}

pub(crate) fn previous_week() -> Value {
    json!({
        "StudentGroupId": 334001,
        "StudentGroupDisplayName": "Группа 24.Б01-мм",
        "WeekDisplayText": "26 августа — 1 сентября",
        "WeekMonday": "2024-08-26",
        "PreviousWeekMonday": "2024-08-19",
        "NextWeekMonday": "2024-09-02",
        "IsPreviousWeekReferenceAvailable": false,
        "IsNextWeekReferenceAvailable": true,
        "Days": []
    })
}

pub(crate) fn educators() -> Value {
    json!({
        "Educators": [
            {
                "Id": 4242,
                "DisplayName": "Иванов И. И.",
                "FullName": "Иванов Иван Иванович",
                "Employments": [
                    { "Position": "доцент", "Department": "Кафедра информатики" },
                    { "Position": "профессор" }
                ]
            },
            {
                "Id": 4243,
                "DisplayName": "Петров П. П."
            }
        ]
    })
}

pub(crate) fn educator_schedule() -> Value {
    json!({
        "EducatorMasterId": 4242,
        "EducatorDisplayText": "Иванов И. И.",
        "EducatorLongDisplayText": "Иванов Иван Иванович, доцент",
        "EducatorEventsDays": [
            {
                "Day": "2024-09-02T00:00:00",
                "DayString": "понедельник, 2 сентября",
                "DayStudyEvents": [
                    {
                        "Start": "2024-09-02T09:30:00",
                        "End": "2024-09-02T11:05:00",
                        "Subject": "Алгебра, лекция",
                        "TimeIntervalString": "09:30–11:05",
                        "StudyEventsTimeTableKindCode": 1,
                        "ContingentUnitName": "24.Б01-мм",
                        "EventLocations": [
                            { "DisplayName": "Университетская наб., д. 7-9, 1304" }
                        ]
                    }
                ]
            }
        ]
    })
}

pub(crate) fn addresses() -> Value {
    json!([
        {
            "Oid": "addr-uni",
            "DisplayName1": "Университетская наб., д. 7-9",
            "Matches": "1",
            "WantingEquipment": null
        },
        {
            "Oid": "addr-a",
            "DisplayName1": "Address A"
        },
        {
            "Oid": "addr-line",
            "DisplayName1": "14-я линия В.О., д. 29"
        }
    ])
}

pub(crate) fn rooms_uni() -> Value {
    json!([
        {
            "Oid": "room-1304",
            "DisplayName1": "1304",
            "Seating": "амфитеатр",
            "Capacity": 40,
            "AdditionalInfo": null
        },
        {
            "Oid": "room-130",
            "DisplayName1": "130",
            "Capacity": 20
        },
        {
            "Oid": "room-hall",
            "DisplayName1": "Актовый зал"
        }
    ])
}

pub(crate) fn rooms_a() -> Value {
    json!([
        { "Oid": "room-101", "DisplayName1": "101" },
        { "Oid": "room-101a", "DisplayName1": "101-A" }
    ])
}

pub(crate) fn event_board() -> Value {
    json!({
        "Alias": "MATH",
        "Title": "Открытые лекции",
        "Days": [
            {
                "Day": "2024-09-05T00:00:00",
                "DayString": "четверг, 5 сентября",
                "DayEvents": [
                    {
                        "Start": "2024-09-05T18:00:00",
                        "End": "2024-09-05T19:30:00",
                        "Subject": "Лекция о звёздах",
                        "TimeIntervalString": "18:00–19:30",
                        "LocationsDisplayText": "Университетская наб., д. 7-9, 1304"
                    },
                    {
                        "Start": "2024-09-05T20:00:00",
                        "End": "2024-09-05T21:00:00",
                        "Subject": "Без времени"
                    }
                ]
            }
        ]
    })
}
